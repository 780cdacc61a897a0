//! Crate-wide error type.
//!
//! ERROR HANDLING
//! ==============
//! Errors stay inside the widget that raised them. The runtime logs them and
//! keeps mounting or dispatching for every other widget on the page.

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("missing element `{selector}`")]
    MissingElement { selector: String },
    #[error("javascript error: {0}")]
    Js(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("form endpoint responded with status {status}")]
    Status { status: u16 },
    #[error("invalid date: {0}")]
    Date(String),
}

impl FolioError {
    pub(crate) fn missing(selector: &str) -> Self {
        Self::MissingElement { selector: selector.to_owned() }
    }
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for FolioError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
