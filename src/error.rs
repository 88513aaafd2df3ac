use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("could not parse page config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid page config: {0}")]
    InvalidConfig(String),
    #[error("demo catalog is incomplete: {0}")]
    Catalog(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        PageError::Js(text)
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
