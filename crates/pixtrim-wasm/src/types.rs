//! WASM-compatible wrapper types for image data.

use pixtrim_core::ImageBuffer;
use wasm_bindgen::prelude::*;

/// A read-only snapshot of the session's active image.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` and `to_rgba()` copy it
/// out to a JavaScript `Uint8Array` on every call, so keep the result around
/// rather than calling them once per frame.
#[wasm_bindgen]
pub struct JsImageBuffer {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Bytes per pixel (always 3)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.inner.channels()
    }

    /// Number of bytes in the RGB pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns opaque RGBA pixel data, ready for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.inner
            .pixels()
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }
}

impl JsImageBuffer {
    pub(crate) fn from_buffer(inner: ImageBuffer) -> Self {
        Self { inner }
    }
}
