//! WASM bindings for `md-html`.
//!
//! Exposes the converter to JavaScript via wasm-bindgen. Call
//! `render_html()` for an HTML fragment, `blocks()` for the classified block
//! list as JSON, or `inline_nodes()` for the inline spans of one line.

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One classified block, as returned by `blocks()`.
#[derive(Debug, Serialize)]
pub struct BlockInfo {
    pub kind: md_html::BlockType,
    pub text: String,
}

/// Convert a markdown document to an HTML fragment rooted at a `div`.
///
/// Malformed inline markup is thrown as a JavaScript error carrying the
/// converter's message.
#[wasm_bindgen]
pub fn render_html(input: &str) -> Result<String, JsValue> {
    md_html::markdown_to_html(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Segment and classify a document.
///
/// Returns a JSON array of `{ kind, text }` objects.
#[wasm_bindgen]
pub fn blocks(input: &str) -> String {
    serde_json::to_string(&block_infos(input)).unwrap_or_else(|_| "[]".to_string())
}

/// Split one run of inline text into spans.
///
/// Returns an array of `{ content, kind, target? }` objects.
#[wasm_bindgen]
pub fn inline_nodes(text: &str) -> Result<JsValue, JsValue> {
    let nodes = md_html::text_to_textnodes(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&nodes).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn block_infos(input: &str) -> Vec<BlockInfo> {
    md_html::markdown_to_blocks(input)
        .into_iter()
        .map(|text| BlockInfo {
            kind: md_html::block_to_block_type(&text),
            text,
        })
        .collect()
}
