use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use web_sys::{Document, Window};

use stopwatch_core::Controller;

use crate::config::WidgetConfig;
use crate::error::InitError;
use crate::input::{bind_buttons, remove_all, Listener};
use crate::ticker::{IntervalScheduler, WebClock};
use crate::ui::{element_by_id, Buttons, DomSurface};

pub type WidgetController = Controller<DomSurface, WebClock, IntervalScheduler>;
pub type SharedController = RefCell<WidgetController>;

/// A stopwatch bound to one host page.
pub struct Widget {
    controller: Rc<SharedController>,
    listeners: Vec<Listener>,
}

impl Widget {
    pub fn mount(window: Window, document: Document, config: &WidgetConfig) -> Result<Self, InitError> {
        let ids = &config.ids;
        let display = element_by_id(&document, &ids.display)?;
        let laps = element_by_id(&document, &ids.laps)?;
        let buttons = Buttons::find(&document, ids)?;

        let surface = DomSurface::new(document, display, laps, buttons.clone());
        let controller_config = config.controller;
        let controller = Rc::new_cyclic(|weak: &Weak<SharedController>| {
            let scheduler = IntervalScheduler::new(window, tick_handler(weak.clone()));
            RefCell::new(Controller::new(surface, WebClock::new(), scheduler, controller_config))
        });

        let listeners = bind_buttons(&buttons, &controller, config.duplicate_window_ms)?;

        log::info!(
            "Stopwatch mounted, tick every {} ms",
            controller.borrow().config().tick_interval_ms
        );
        Ok(Self { controller, listeners })
    }

    /// Detach from the page. Any running tick is cancelled.
    pub fn unmount(self) {
        remove_all(self.listeners);
        self.controller.borrow_mut().stop();
        log::info!("Stopwatch unmounted");
    }
}

fn tick_handler(controller: Weak<SharedController>) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(controller) = controller.upgrade() {
            // A tick that lands while an action runs is skipped; the next
            // one recomputes from the anchor anyway.
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.tick();
            }
        }
    })
}
