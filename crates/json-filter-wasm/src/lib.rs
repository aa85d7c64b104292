//! WASM bindings for json-filter.
//!
//! Exposes filtering, canonicalisation and sub-filter lookup as
//! `#[wasm_bindgen]` functions callable from JavaScript/TypeScript.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p json-filter-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/json_filter_wasm.wasm
//! ```

use json_filter::FilterSpecification;
use wasm_bindgen::prelude::*;

fn to_js(e: json_filter::FilterError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Filter a JSON document with a filter specification.
///
/// Returns compact JSON, or throws a JS error if either the JSON or the
/// filter is invalid.
#[wasm_bindgen(js_name = filterJson)]
pub fn filter_json(json: &str, filter: &str) -> std::result::Result<String, JsValue> {
    json_filter::filter_json(json, filter).map_err(to_js)
}

/// Canonical form of a filter specification, e.g. `a(c,b),a.d` → `a(b,c,d)`.
#[wasm_bindgen(js_name = canonicalFilter)]
pub fn canonical_filter(filter: &str) -> std::result::Result<String, JsValue> {
    FilterSpecification::parse(filter)
        .map(|spec| spec.to_string())
        .map_err(to_js)
}

/// Canonical form of the sub-filter at a dotted path, or `undefined` when the
/// path is not part of the filter.
#[wasm_bindgen]
pub fn subfilter(filter: &str, path: &str) -> std::result::Result<Option<String>, JsValue> {
    let spec = FilterSpecification::parse(filter).map_err(to_js)?;
    Ok(spec.subfilter(path).map(|sub| sub.to_string()))
}
