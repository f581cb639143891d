use crate::Action;

/// How long after an accepted activation the same action arriving from the
/// other input source is treated as the same user intent.
pub const DUPLICATE_WINDOW_MS: u64 = 500;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputSource {
    Pointer,
    Touch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Activation {
    pub action: Action,
    pub source: InputSource,
    pub at_ms: u64,
}

impl Activation {
    pub fn new(action: Action, source: InputSource, at_ms: u64) -> Self {
        Self { action, source, at_ms }
    }
}

/// Collapses a touch and the pointer click the browser synthesizes for it
/// into one logical activation. Each action is tracked on its own, so other
/// buttons pressed in between don't hide a duplicate.
#[derive(Debug)]
pub struct ActivationFilter {
    window_ms: u64,
    last: [Option<Activation>; Action::ALL.len()],
}

impl ActivationFilter {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, last: [None; Action::ALL.len()] }
    }

    pub fn accept(&mut self, activation: Activation) -> bool {
        let slot = &mut self.last[activation.action.index()];
        if let Some(prev) = *slot {
            let duplicate = prev.source != activation.source
                && activation.at_ms.saturating_sub(prev.at_ms) < self.window_ms;
            if duplicate {
                log::trace!("suppressed duplicate {:?} from {:?}", activation.action, activation.source);
                return false;
            }
        }
        *slot = Some(activation);
        true
    }
}

impl Default for ActivationFilter {
    fn default() -> Self {
        Self::new(DUPLICATE_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(action: Action, at_ms: u64) -> Activation {
        Activation::new(action, InputSource::Touch, at_ms)
    }

    fn click(action: Action, at_ms: u64) -> Activation {
        Activation::new(action, InputSource::Pointer, at_ms)
    }

    #[test]
    fn test_touch_then_click_is_one_intent() {
        let mut filter = ActivationFilter::default();
        assert!(filter.accept(touch(Action::Lap, 1_000)));
        assert!(!filter.accept(click(Action::Lap, 1_300)));
    }

    #[test]
    fn test_click_then_touch_is_one_intent() {
        let mut filter = ActivationFilter::default();
        assert!(filter.accept(click(Action::Start, 10)));
        assert!(!filter.accept(touch(Action::Start, 20)));
    }

    #[test]
    fn test_same_source_repeats_are_accepted() {
        let mut filter = ActivationFilter::default();
        assert!(filter.accept(touch(Action::Lap, 1_000)));
        assert!(filter.accept(touch(Action::Lap, 1_050)));
        assert!(filter.accept(click(Action::Lap, 5_000)));
        assert!(filter.accept(click(Action::Lap, 5_010)));
    }

    #[test]
    fn test_other_action_is_accepted() {
        let mut filter = ActivationFilter::default();
        assert!(filter.accept(touch(Action::Start, 1_000)));
        assert!(filter.accept(click(Action::Stop, 1_100)));
    }

    #[test]
    fn test_duplicate_split_by_other_action() {
        let mut filter = ActivationFilter::default();
        assert!(filter.accept(touch(Action::Lap, 0)));
        assert!(filter.accept(touch(Action::Stop, 100)));
        assert!(!filter.accept(click(Action::Lap, 150)));
        assert!(!filter.accept(click(Action::Stop, 180)));
    }

    #[test]
    fn test_window_expires() {
        let mut filter = ActivationFilter::new(300);
        assert!(filter.accept(touch(Action::Lap, 1_000)));
        assert!(!filter.accept(click(Action::Lap, 1_299)));
        assert!(filter.accept(click(Action::Lap, 1_300)));
    }

    #[test]
    fn test_suppressed_activation_does_not_extend_window() {
        let mut filter = ActivationFilter::new(300);
        assert!(filter.accept(touch(Action::Lap, 1_000)));
        assert!(!filter.accept(click(Action::Lap, 1_200)));
        // Measured from the accepted touch, not the suppressed click
        assert!(filter.accept(click(Action::Lap, 1_350)));
    }
}
