use stopwatch_core::{Action, ControllerConfig, DUPLICATE_WINDOW_MS};

pub const ATTR_TICK_INTERVAL: &str = "data-tick-interval";
pub const ATTR_DUPLICATE_WINDOW: &str = "data-duplicate-window";
pub const ATTR_LOG_LEVEL: &str = "data-log-level";

/// Ids of the host page elements the widget binds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIds {
    pub display: String,
    pub laps: String,
    pub start: String,
    pub stop: String,
    pub reset: String,
    pub lap: String,
}

impl ElementIds {
    pub fn button(&self, action: Action) -> &str {
        match action {
            Action::Start => &self.start,
            Action::Stop => &self.stop,
            Action::Reset => &self.reset,
            Action::Lap => &self.lap,
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            display: "timeDisplay".to_string(),
            laps: "lapTimes".to_string(),
            start: "startBtn".to_string(),
            stop: "stopBtn".to_string(),
            reset: "resetBtn".to_string(),
            lap: "lapBtn".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub ids: ElementIds,
    pub controller: ControllerConfig,
    pub duplicate_window_ms: u64,
    pub log_level: log::Level,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            controller: ControllerConfig::default(),
            duplicate_window_ms: DUPLICATE_WINDOW_MS,
            log_level: log::Level::Info,
        }
    }
}

impl WidgetConfig {
    /// Apply `data-*` overrides. `lookup` returns the raw attribute value;
    /// values that don't parse keep the default.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_override::<u32>(&lookup, ATTR_TICK_INTERVAL) {
            self.controller = ControllerConfig { tick_interval_ms: ms }.normalized();
        }
        if let Some(ms) = parse_override::<u64>(&lookup, ATTR_DUPLICATE_WINDOW) {
            self.duplicate_window_ms = ms;
        }
        if let Some(level) = parse_override::<log::Level>(&lookup, ATTR_LOG_LEVEL) {
            self.log_level = level;
        }
        self
    }
}

fn parse_override<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default().with_overrides(attrs(&[]));
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.controller.tick_interval_ms, 10);
        assert_eq!(config.ids.display, "timeDisplay");
        assert_eq!(config.ids.button(Action::Lap), "lapBtn");
    }

    #[test]
    fn test_overrides() {
        let config = WidgetConfig::default().with_overrides(attrs(&[
            (ATTR_TICK_INTERVAL, "5"),
            (ATTR_DUPLICATE_WINDOW, " 800 "),
            (ATTR_LOG_LEVEL, "debug"),
        ]));
        assert_eq!(config.controller.tick_interval_ms, 5);
        assert_eq!(config.duplicate_window_ms, 800);
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn test_tick_override_is_clamped() {
        let config = WidgetConfig::default().with_overrides(attrs(&[(ATTR_TICK_INTERVAL, "1000")]));
        assert_eq!(config.controller.tick_interval_ms, 10);
    }

    #[test]
    fn test_malformed_overrides_keep_defaults() {
        let config = WidgetConfig::default().with_overrides(attrs(&[
            (ATTR_TICK_INTERVAL, "fast"),
            (ATTR_DUPLICATE_WINDOW, "-3"),
            (ATTR_LOG_LEVEL, "loud"),
        ]));
        assert_eq!(config, WidgetConfig::default());
    }
}
