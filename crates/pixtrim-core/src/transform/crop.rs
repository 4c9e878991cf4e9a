//! Image cropping in buffer-space pixel coordinates.
//!
//! # Coordinate System
//!
//! - `(x1, y1)` is the inclusive top-left corner
//! - `(x2, y2)` is the exclusive bottom-right corner
//! - The region copied is rows `[y1, y2)` and columns `[x1, x2)`

use crate::buffer::{ImageBuffer, CHANNELS};
use crate::geometry::Rect;

/// Crop a buffer to a pixel rectangle.
///
/// The rectangle is clamped to the buffer before use. A region that is empty
/// after clamping is a no-op and yields `None`; the caller keeps the input.
///
/// # Example
///
/// ```ignore
/// let cropped = apply_crop(&image, Rect::new(10, 10, 60, 40)).unwrap();
/// assert_eq!(cropped.dimensions(), (50, 30));
/// ```
pub fn apply_crop(image: &ImageBuffer, rect: Rect) -> Option<ImageBuffer> {
    let rect = rect.clamp_to(image.width(), image.height());
    if rect.is_empty() {
        return None;
    }

    let (left, top) = (rect.x1 as usize, rect.y1 as usize);
    let out_width = rect.width() as usize;
    let out_height = rect.height() as usize;

    // Fast path: full crop returns a clone
    if out_width == image.width() as usize && out_height == image.height() as usize {
        return Some(image.clone());
    }

    let bpp = CHANNELS as usize;
    let src_stride = image.stride();
    let dst_stride = out_width * bpp;
    let mut output = Vec::with_capacity(dst_stride * out_height);

    for y in top..top + out_height {
        let start = y * src_stride + left * bpp;
        output.extend_from_slice(&image.pixels()[start..start + dst_stride]);
    }

    ImageBuffer::new(out_width as u32, out_height as u32, output).ok()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
