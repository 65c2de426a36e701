//! Error type for the browser-facing parts of the flipbook.
//!
//! The curl engine itself never fails: degenerate geometry falls back to a
//! flat page and out-of-range pages draw a placeholder. Everything here comes
//! from the host side (DOM lookups, image decoding, config parsing, canvas
//! calls that throw).

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FlipbookError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("canvas element `{0}` not found")]
    CanvasMissing(String),

    #[error("2d rendering context unavailable")]
    ContextUnavailable,

    #[error("failed to load page image: {src}")]
    ImageLoad { src: String },

    #[error("invalid flipbook config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for FlipbookError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}
