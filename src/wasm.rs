//! WASM bindings for browser and edge runtimes.
//!
//! Components cross the boundary as JSON strings, in the same shape the
//! crate serializes them everywhere else.

use wasm_bindgen::prelude::*;

use crate::model::ArticleData;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse article markup without media context.
///
/// Returns a JSON array of components.
#[wasm_bindgen]
pub fn parse(html: &str) -> Result<String, JsValue> {
    serde_json::to_string(&crate::parse(html)).map_err(to_js_error)
}

/// Parse a legacy parser JSON document (`article`, `images`, `videos`,
/// `givenUrl`), resolving media placeholders.
///
/// Returns a JSON array of components.
#[wasm_bindgen]
pub fn parse_article(json: &str) -> Result<String, JsValue> {
    let article = ArticleData::from_json(json).map_err(to_js_error)?;
    serde_json::to_string(&crate::parse_article(&article)).map_err(to_js_error)
}
