use crate::state::{LapEntry, StopwatchState};
use crate::format_elapsed;

/// Display refresh cadence while running.
pub const TICK_INTERVAL_MS: u32 = 10;
/// Coarsest cadence that still refreshes every centisecond.
pub const MAX_TICK_INTERVAL_MS: u32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Action {
    Start,
    Stop,
    Reset,
    Lap,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Start, Action::Stop, Action::Reset, Action::Lap];

    /// Position in `Action::ALL`.
    pub fn index(self) -> usize {
        match self {
            Action::Start => 0,
            Action::Stop => 1,
            Action::Reset => 2,
            Action::Lap => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Reset => "reset",
            Action::Lap => "lap",
        }
    }
}

/// Enabled state of the four controls, derived from run state alone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Affordances {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
    pub lap: bool,
}

impl Affordances {
    pub fn for_running(running: bool) -> Self {
        Self {
            start: !running,
            stop: running,
            reset: !running,
            lap: running,
        }
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::Start => self.start,
            Action::Stop => self.stop,
            Action::Reset => self.reset,
            Action::Lap => self.lap,
        }
    }
}

/// Millisecond time source. Only differences between readings matter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Repeating tick source. At most one schedule is live at a time;
/// scheduling again replaces the previous one.
pub trait Scheduler {
    fn schedule(&mut self, interval_ms: u32);
    fn cancel(&mut self);
}

/// Where the controller renders: the time display, the lap log and the
/// four controls.
pub trait Surface {
    fn show_time(&mut self, text: &str);
    fn prepend_lap(&mut self, entry: &LapEntry);
    fn clear_laps(&mut self);
    fn scroll_laps_to_top(&mut self);
    fn set_enabled(&mut self, action: Action, enabled: bool);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ControllerConfig {
    pub tick_interval_ms: u32,
}

impl ControllerConfig {
    pub fn normalized(self) -> Self {
        Self {
            tick_interval_ms: self.tick_interval_ms.clamp(1, MAX_TICK_INTERVAL_MS),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { tick_interval_ms: TICK_INTERVAL_MS }
    }
}

pub struct Controller<S, C, T> {
    state: StopwatchState,
    surface: S,
    clock: C,
    scheduler: T,
    config: ControllerConfig,
}

impl<S: Surface, C: Clock, T: Scheduler> Controller<S, C, T> {
    pub fn new(surface: S, clock: C, scheduler: T, config: ControllerConfig) -> Self {
        let mut controller = Self {
            state: StopwatchState::new(),
            surface,
            clock,
            scheduler,
            config: config.normalized(),
        };
        controller.surface.show_time(&format_elapsed(0));
        controller.update_affordances();
        controller
    }

    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        if !self.state.start(now) {
            log::trace!("start ignored, already running");
            return;
        }
        self.scheduler.schedule(self.config.tick_interval_ms);
        log::debug!("started at {}", format_elapsed(self.state.elapsed_ms()));
        self.update_affordances();
    }

    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let elapsed = self.state.sample(self.clock.now_ms());
        self.surface.show_time(&format_elapsed(elapsed));
    }

    pub fn stop(&mut self) {
        let now = self.clock.now_ms();
        if !self.state.stop(now) {
            log::trace!("stop ignored, not running");
            return;
        }
        self.scheduler.cancel();
        self.surface.show_time(&format_elapsed(self.state.elapsed_ms()));
        log::debug!("stopped at {}", format_elapsed(self.state.elapsed_ms()));
        self.update_affordances();
    }

    pub fn reset(&mut self) {
        self.stop();
        self.state.reset();
        self.surface.show_time(&format_elapsed(0));
        self.surface.clear_laps();
        log::debug!("reset");
        self.update_affordances();
    }

    pub fn record_lap(&mut self) {
        let now = self.clock.now_ms();
        let Some(entry) = self.state.record_lap(now) else {
            log::trace!("lap ignored, not running");
            return;
        };
        self.surface.prepend_lap(&entry);
        self.surface.scroll_laps_to_top();
        log::debug!("{} at {}", entry.label(), entry.time_text());
    }

    pub fn update_affordances(&mut self) {
        let affordances = Affordances::for_running(self.state.is_running());
        for action in Action::ALL {
            self.surface.set_enabled(action, affordances.is_enabled(action));
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::Stop => self.stop(),
            Action::Reset => self.reset(),
            Action::Lap => self.record_lap(),
        }
    }

    pub fn state(&self) -> &StopwatchState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.state.elapsed_ms()
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }
}
