//! Pure stopwatch logic library with no platform dependencies.
//! Testable on host, driven by the browser widget on wasm.

mod activation;
mod controller;
mod state;

pub use activation::{Activation, ActivationFilter, InputSource, DUPLICATE_WINDOW_MS};
pub use controller::{
    Action, Affordances, Clock, Controller, ControllerConfig, Scheduler, Surface,
    MAX_TICK_INTERVAL_MS, TICK_INTERVAL_MS,
};
pub use state::{LapEntry, StopwatchState};

/// Format milliseconds as "HH:MM:SS.cc" (centiseconds).
///
/// The hours field is zero-padded to two digits and grows past that
/// instead of wrapping.
pub fn format_elapsed(ms: u64) -> String {
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}

/// Parse "H+:MM:SS.cc" back into milliseconds.
///
/// Returns `None` unless the text is exactly what `format_elapsed` emits:
/// at least two hour digits, minutes and seconds below 60, two centisecond
/// digits.
pub fn parse_elapsed(text: &str) -> Option<u64> {
    let (hms, cs) = text.split_once('.')?;
    let mut parts = hms.split(':');
    let h = parts.next()?;
    let m = parts.next()?;
    let s = parts.next()?;
    if parts.next().is_some() || h.len() < 2 {
        return None;
    }

    let h = parse_digits(h)?;
    let m = parse_field(m, 60)?;
    let s = parse_field(s, 60)?;
    let cs = parse_field(cs, 100)?;

    h.checked_mul(3600)?
        .checked_add(m * 60 + s)?
        .checked_mul(1000)?
        .checked_add(cs * 10)
}

fn parse_digits(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_field(field: &str, limit: u64) -> Option<u64> {
    if field.len() != 2 {
        return None;
    }
    parse_digits(field).filter(|v| *v < limit)
}
