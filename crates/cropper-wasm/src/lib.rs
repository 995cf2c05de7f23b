//! Cropper WASM - WebAssembly bindings for the crop-region engine
//!
//! This crate exposes `cropper-core` to JavaScript/TypeScript hosts that own
//! the canvas and the input events.
//!
//! # Module Structure
//!
//! - `cropper` - `JsImageCropper`, the interactive engine handle
//! - `types` - WASM-compatible wrapper types for image data
//! - `console` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageCropper } from '@cropper/wasm';
//!
//! await init();
//! const cropper = new JsImageCropper({ width: 4, height: 3, keep_aspect: true });
//! cropper.set_image(image.naturalWidth, image.naturalHeight);
//! ```

use wasm_bindgen::prelude::*;

mod console;
mod cropper;
mod types;

pub use cropper::{JsImageCropper, FLAG_DRAGGING, FLAG_HOVERED};
pub use types::JsRgbImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console::install(log::LevelFilter::Info);
}

/// Change the console log level: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level).map_err(|e| JsValue::from_str(&e))?;
    console::install(filter);
    Ok(())
}

fn parse_level(level: &str) -> Result<log::LevelFilter, String> {
    level
        .parse::<log::LevelFilter>()
        .map_err(|_| format!("Unknown log level: {}", level))
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
