use thiserror::Error;

/// Failures while binding the widget to the host page. All of them mean the
/// page is not what the widget was built for, so they are fatal.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{id} not found")]
    MissingElement { id: String },
    #[error("element #{id} is not a {expected}")]
    WrongElementKind { id: String, expected: &'static str },
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for InitError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        InitError::Js(format!("{:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_element() {
        let missing = InitError::MissingElement { id: "lapBtn".to_string() };
        assert_eq!(missing.to_string(), "element #lapBtn not found");

        let wrong = InitError::WrongElementKind { id: "startBtn".to_string(), expected: "<button>" };
        assert_eq!(wrong.to_string(), "element #startBtn is not a <button>");
    }
}
