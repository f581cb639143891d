use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement};

use stopwatch_core::{Action, LapEntry, Surface};

use crate::config::ElementIds;
use crate::error::InitError;

pub const LAP_ROW_CLASS: &str = "lap-time-item";
pub const LAP_SPLIT_CLASS: &str = "lap-split";

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, InitError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| InitError::MissingElement { id: id.to_string() })
}

pub fn button_by_id(document: &Document, id: &str) -> Result<HtmlButtonElement, InitError> {
    element_by_id(document, id)?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| InitError::WrongElementKind { id: id.to_string(), expected: "<button>" })
}

/// The four control buttons, in `Action::ALL` order.
#[derive(Clone)]
pub struct Buttons([HtmlButtonElement; 4]);

impl Buttons {
    pub fn find(document: &Document, ids: &ElementIds) -> Result<Self, InitError> {
        Ok(Self([
            button_by_id(document, ids.button(Action::Start))?,
            button_by_id(document, ids.button(Action::Stop))?,
            button_by_id(document, ids.button(Action::Reset))?,
            button_by_id(document, ids.button(Action::Lap))?,
        ]))
    }

    pub fn get(&self, action: Action) -> &HtmlButtonElement {
        match action {
            Action::Start => &self.0[0],
            Action::Stop => &self.0[1],
            Action::Reset => &self.0[2],
            Action::Lap => &self.0[3],
        }
    }
}

/// Renders the stopwatch into the host page.
pub struct DomSurface {
    document: Document,
    display: Element,
    laps: Element,
    buttons: Buttons,
}

impl DomSurface {
    pub fn new(document: Document, display: Element, laps: Element, buttons: Buttons) -> Self {
        Self { document, display, laps, buttons }
    }

    fn lap_row(&self, entry: &LapEntry) -> Result<Element, wasm_bindgen::JsValue> {
        let row = self.document.create_element("div")?;
        row.set_class_name(LAP_ROW_CLASS);

        let label = self.document.create_element("span")?;
        label.set_text_content(Some(&entry.label()));
        row.append_child(&label)?;

        let time = self.document.create_element("span")?;
        time.set_text_content(Some(&entry.time_text()));
        row.append_child(&time)?;

        let split = self.document.create_element("span")?;
        split.set_class_name(LAP_SPLIT_CLASS);
        split.set_text_content(Some(&entry.split_text()));
        row.append_child(&split)?;

        Ok(row)
    }
}

impl Surface for DomSurface {
    fn show_time(&mut self, text: &str) {
        self.display.set_text_content(Some(text));
    }

    fn prepend_lap(&mut self, entry: &LapEntry) {
        let inserted = self
            .lap_row(entry)
            .and_then(|row| self.laps.insert_before(&row, self.laps.first_child().as_ref()));
        if let Err(e) = inserted {
            log::error!("couldn't add {}: {:?}", entry.label(), e);
        }
    }

    fn clear_laps(&mut self) {
        self.laps.set_inner_html("");
    }

    fn scroll_laps_to_top(&mut self) {
        self.laps.set_scroll_top(0);
    }

    fn set_enabled(&mut self, action: Action, enabled: bool) {
        self.buttons.get(action).set_disabled(!enabled);
    }
}
