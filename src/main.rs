mod config;
mod error;
mod input;
mod ticker;
mod ui;
mod widget;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, PageTransitionEvent, Window};

use crate::config::WidgetConfig;
use crate::error::InitError;
use crate::widget::Widget;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Trace).ok();

    let (window, document) = match host() {
        Ok(host) => host,
        Err(e) => fatal(e),
    };
    log::info!("Stopwatch {} starting", env!("CARGO_PKG_VERSION"));

    if is_loading(&document.ready_state()) {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || mount(window, target));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
            fatal(InitError::from(e));
        }
    } else {
        mount(window, document);
    }
}

fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn host() -> Result<(Window, Document), InitError> {
    let window = web_sys::window().ok_or(InitError::NoWindow)?;
    let document = window.document().ok_or(InitError::NoDocument)?;
    Ok((window, document))
}

/// Overrides live on the display element. A missing element keeps the
/// defaults; mounting reports it.
fn read_config(document: &Document) -> WidgetConfig {
    let defaults = WidgetConfig::default();
    match document.get_element_by_id(&defaults.ids.display) {
        Some(display) => defaults.with_overrides(|name| display.get_attribute(name)),
        None => defaults,
    }
}

fn mount(window: Window, document: Document) {
    let config = read_config(&document);
    log::set_max_level(config.log_level.to_level_filter());
    let mounted = Widget::mount(window.clone(), document, &config)
        .and_then(|widget| unmount_on_pagehide(&window, widget));
    if let Err(e) = mounted {
        fatal(e);
    }
}

/// The widget lives as long as the page; it is torn down when the page is
/// discarded, but kept when it goes into the back/forward cache.
fn unmount_on_pagehide(window: &Window, widget: Widget) -> Result<(), InitError> {
    let mut widget = Some(widget);
    let on_pagehide = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
        if event.persisted() {
            return;
        }
        if let Some(widget) = widget.take() {
            widget.unmount();
        }
    });
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();
    Ok(())
}

fn fatal(error: InitError) -> ! {
    log::error!("Stopwatch failed to start: {}", error);
    wasm_bindgen::throw_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waits_only_while_loading() {
        assert!(is_loading("loading"));
        assert!(!is_loading("interactive"));
        assert!(!is_loading("complete"));
    }
}
