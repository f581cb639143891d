use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;
use web_time::Instant;

use stopwatch_core::{Clock, Scheduler};

/// Milliseconds since the widget was mounted, from `performance.now()`.
pub struct WebClock {
    origin: Instant,
}

impl WebClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for WebClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Drives a fixed tick callback with `setInterval`.
pub struct IntervalScheduler {
    window: Window,
    tick: Closure<dyn FnMut()>,
    handle: Option<i32>,
}

impl IntervalScheduler {
    pub fn new(window: Window, tick: Closure<dyn FnMut()>) -> Self {
        Self { window, tick, handle: None }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, interval_ms: u32) {
        self.cancel();
        let interval = i32::try_from(interval_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(self.tick.as_ref().unchecked_ref(), interval)
        {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => log::error!("couldn't schedule tick: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
