use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum TrackViewError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    #[error("Invalid options: {0}")]
    Options(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<TrackViewError> for JsValue {
    fn from(e: TrackViewError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
