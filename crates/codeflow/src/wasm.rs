//! WebAssembly bindings for browser hosts
//!
//! The canvas, drag-and-drop and prompt box stay in JavaScript; these
//! functions supply the pure parts. Collections cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::core::{extract_code_blocks as extract, ExportFormat};
use crate::diagram::DiagramDocument;
use crate::session::export_file_name as file_name_for;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Extract fenced code blocks from completion text
///
/// # Returns
/// * JSON array of strings, never empty
#[wasm_bindgen(js_name = extractCodeBlocks)]
pub fn extract_code_blocks(text: &str) -> Result<String, JsValue> {
    serde_json::to_string(&extract(text)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Linearize a diagram for the preview pane
///
/// # Arguments
/// * `nodes_json` - JSON array of nodes, flat or canvas-shaped
/// * `edges_json` - JSON array of `{ id?, source, target }`
///
/// # Returns
/// * The preview text
/// * Throws a JavaScript error if either argument is not valid JSON
#[wasm_bindgen(js_name = generatePreview)]
pub fn generate_preview(nodes_json: &str, edges_json: &str) -> Result<String, JsValue> {
    let document = format!(r#"{{"nodes":{},"edges":{}}}"#, nodes_json, edges_json);
    DiagramDocument::from_json(&document)
        .map(|doc| doc.preview())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// File name for a download in the given format (e.g. ".py")
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name(format: &str) -> Result<String, JsValue> {
    format
        .parse::<ExportFormat>()
        .map(file_name_for)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
