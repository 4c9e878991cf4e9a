//! pixtrim WASM - WebAssembly bindings for the pixtrim editing session
//!
//! This crate exposes `pixtrim-core` to a browser page that acts as the host:
//! the page renders the canvas and captures pointer, slider and keyboard
//! input, and the session does everything else.
//!
//! # Module Structure
//!
//! - `session` - `JsEditSession`, the stateful editing session
//! - `types` - `JsImageBuffer`, a snapshot of the active image
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@pixtrim/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load_encoded(new Uint8Array(await file.arrayBuffer()));
//! const image = session.image();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(image.to_rgba()), image.width), 0, 0);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsEditSession;
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "pixtrim-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
