use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use stopwatch_core::{Action, Activation, ActivationFilter, InputSource};

use crate::error::InitError;
use crate::ui::Buttons;
use crate::widget::SharedController;

/// A registered DOM listener. Keeps the closure alive until removed.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn remove(self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        if let Err(e) = removed {
            log::error!("couldn't remove {} listener: {:?}", self.kind, e);
        }
    }
}

/// Bind `click` and `touchstart` on every button to the controller. Both
/// feed one shared filter so a tap produces a single activation.
pub fn bind_buttons(
    buttons: &Buttons,
    controller: &Rc<SharedController>,
    duplicate_window_ms: u64,
) -> Result<Vec<Listener>, InitError> {
    let filter = Rc::new(RefCell::new(ActivationFilter::new(duplicate_window_ms)));
    let mut listeners = Vec::with_capacity(Action::ALL.len() * 2);

    for action in Action::ALL {
        if let Err(e) = bind_action(buttons, action, controller, &filter, &mut listeners) {
            remove_all(listeners);
            return Err(e);
        }
    }

    Ok(listeners)
}

fn bind_action(
    buttons: &Buttons,
    action: Action,
    controller: &Rc<SharedController>,
    filter: &Rc<RefCell<ActivationFilter>>,
    listeners: &mut Vec<Listener>,
) -> Result<(), InitError> {
    let target: &EventTarget = buttons.get(action).as_ref();

    let on_click = activation_handler(action, InputSource::Pointer, controller, filter);
    target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    listeners.push(Listener { target: target.clone(), kind: "click", closure: on_click });

    let on_touch = activation_handler(action, InputSource::Touch, controller, filter);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        on_touch.as_ref().unchecked_ref(),
        &options,
    )?;
    listeners.push(Listener { target: target.clone(), kind: "touchstart", closure: on_touch });
    Ok(())
}

pub fn remove_all(listeners: Vec<Listener>) {
    for listener in listeners {
        listener.remove();
    }
}

fn activation_handler(
    action: Action,
    source: InputSource,
    controller: &Rc<SharedController>,
    filter: &Rc<RefCell<ActivationFilter>>,
) -> Closure<dyn FnMut(Event)> {
    let controller: Weak<SharedController> = Rc::downgrade(controller);
    let filter = Rc::clone(filter);
    Closure::new(move |event: Event| {
        if source == InputSource::Touch {
            event.prevent_default();
        }
        let activation = Activation::new(action, source, event.time_stamp() as u64);
        if !filter.borrow_mut().accept(activation) {
            return;
        }
        let Some(controller) = controller.upgrade() else {
            return;
        };
        match controller.try_borrow_mut() {
            Ok(mut controller) => controller.dispatch(action),
            Err(_) => log::error!("{} activation while controller busy", action.name()),
        };
    })
}
