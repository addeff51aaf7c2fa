//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing session to JavaScript and
//! TypeScript. Pixel data lives in WASM memory; JS receives copies of the
//! before/after images for display.
//!
//! # Module Structure
//!
//! - `session` - `EditSession`: load, update, undo, redo, reset
//! - `params` - `ParameterSet`, the slider state exchanged with the UI
//! - `types` - `JsImage`, the WASM-compatible image wrapper
//! - `encode` - JPEG/PNG export of the rendered image
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditSession, ParameterSet, encode_jpeg } from '@retouch/wasm';
//!
//! await init();
//!
//! const session = new EditSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! const params = ParameterSet.fromObject({ brightness: 10, saturation: 1.2 });
//! const rendered = session.update(params);
//! const jpeg = encode_jpeg(rendered, 90);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod logger;
mod params;
mod session;
mod types;

// Re-export public types
pub use encode::{encode_jpeg, encode_png};
pub use params::JsParameterSet;
pub use session::JsEditSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Change how much of the core's logging reaches the browser console.
///
/// Accepts `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`
/// (case-insensitive).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    logger::init(filter);
    Ok(())
}

fn parse_level(level: &str) -> Option<log::LevelFilter> {
    level.parse().ok()
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
