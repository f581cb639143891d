use crate::format_elapsed;

/// A recorded lap, numbered in recording order starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapEntry {
    pub number: usize,
    /// Total elapsed time when the lap was taken.
    pub elapsed_ms: u64,
    /// Time since the previous lap, or since zero for the first one.
    pub split_ms: u64,
}

impl LapEntry {
    pub fn label(&self) -> String {
        format!("Lap {}", self.number)
    }

    pub fn time_text(&self) -> String {
        format_elapsed(self.elapsed_ms)
    }

    pub fn split_text(&self) -> String {
        format!("+{}", format_elapsed(self.split_ms))
    }
}

/// Run state and accumulated time of a single stopwatch.
///
/// Every operation takes the current clock reading, so the state itself
/// never reads a clock.
#[derive(Clone, Debug, Default)]
pub struct StopwatchState {
    running: bool,
    anchor_ms: u64,
    elapsed_ms: u64,
    laps: Vec<u64>,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.anchor_ms = now_ms.saturating_sub(self.elapsed_ms);
        self.running = true;
        true
    }

    /// Recompute elapsed from the anchor while running. Elapsed never moves
    /// backwards, even if the clock does.
    pub fn sample(&mut self, now_ms: u64) -> u64 {
        if self.running {
            let measured = now_ms.saturating_sub(self.anchor_ms);
            self.elapsed_ms = self.elapsed_ms.max(measured);
        }
        self.elapsed_ms
    }

    /// Returns false if already stopped.
    pub fn stop(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.sample(now_ms);
        self.running = false;
        true
    }

    pub fn record_lap(&mut self, now_ms: u64) -> Option<LapEntry> {
        if !self.running {
            return None;
        }
        let elapsed = self.sample(now_ms);
        self.laps.push(elapsed);
        Some(self.lap_entry(self.laps.len() - 1))
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.anchor_ms = 0;
        self.elapsed_ms = 0;
        self.laps.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    fn lap_entry(&self, index: usize) -> LapEntry {
        let elapsed_ms = self.laps[index];
        let previous = if index == 0 { 0 } else { self.laps[index - 1] };
        LapEntry {
            number: index + 1,
            elapsed_ms,
            split_ms: elapsed_ms.saturating_sub(previous),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let mut sw = StopwatchState::new();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 0);

        assert!(sw.start(1000));
        assert!(sw.is_running());
        assert_eq!(sw.sample(1500), 500);
        assert_eq!(sw.sample(2000), 1000);

        assert!(sw.stop(2000));
        assert!(!sw.is_running());
        assert_eq!(sw.sample(5000), 1000); // Frozen while stopped

        sw.start(5000);
        assert_eq!(sw.sample(5500), 1500);

        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.sample(10_000), 0);
    }

    #[test]
    fn test_resume_keeps_accumulated_time() {
        let mut sw = StopwatchState::new();
        sw.start(100);
        sw.stop(350);
        sw.start(1_000);
        sw.stop(1_125);
        assert_eq!(sw.elapsed_ms(), 250 + 125);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let mut sw = StopwatchState::new();
        assert!(sw.start(100));
        assert!(!sw.start(400));
        assert_eq!(sw.sample(600), 500);

        assert!(sw.stop(600));
        assert!(!sw.stop(900));
        assert_eq!(sw.elapsed_ms(), 500);
    }

    #[test]
    fn test_clock_stepping_back() {
        let mut sw = StopwatchState::new();
        sw.start(1_000);
        assert_eq!(sw.sample(1_400), 400);
        assert_eq!(sw.sample(900), 400);
        assert_eq!(sw.sample(1_500), 500);
    }

    #[test]
    fn test_lap() {
        let mut sw = StopwatchState::new();
        sw.start(0);

        let lap1 = sw.record_lap(5000).unwrap();
        assert_eq!(lap1, LapEntry { number: 1, elapsed_ms: 5000, split_ms: 5000 });
        assert!(sw.is_running());

        let lap2 = sw.record_lap(8000).unwrap();
        assert_eq!(lap2, LapEntry { number: 2, elapsed_ms: 8000, split_ms: 3000 });
        assert_eq!(sw.laps(), &[5000, 8000]);

        let lap3 = sw.record_lap(8600).unwrap();
        assert_eq!(lap3.split_ms, 600);
    }

    #[test]
    fn test_lap_while_stopped() {
        let mut sw = StopwatchState::new();
        assert_eq!(sw.record_lap(100), None);

        sw.start(0);
        sw.record_lap(50);
        sw.stop(80);
        assert_eq!(sw.record_lap(200), None);
        assert_eq!(sw.laps().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.record_lap(40);
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());

        // Starting after a reset measures from zero again
        sw.start(10_000);
        assert_eq!(sw.sample(10_250), 250);
    }

    #[test]
    fn test_lap_entry_text() {
        let entry = LapEntry { number: 3, elapsed_ms: 61_230, split_ms: 1_500 };
        assert_eq!(entry.label(), "Lap 3");
        assert_eq!(entry.time_text(), "00:01:01.23");
        assert_eq!(entry.split_text(), "+00:00:01.50");
    }
}
