//! Percentage scaling with a fixed resampling filter.
//!
//! Output dimensions are `floor(side * percent / 100)`, never smaller than 1.
//! Resampling goes through `image::imageops::resize`, which is deterministic
//! for a given filter.

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferError, ImageBuffer};

/// Smallest accepted scale percentage.
pub const MIN_SCALE_PERCENT: u32 = 1;
/// Largest accepted scale percentage.
pub const MAX_SCALE_PERCENT: u32 = 200;

/// Resampling filter used by [`apply_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFilter {
    /// Nearest neighbor interpolation (fastest, blocky when enlarging).
    Nearest,
    /// Bilinear interpolation (smooth, default).
    #[default]
    Bilinear,
}

impl ScaleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ScaleFilter::Nearest => image::imageops::FilterType::Nearest,
            ScaleFilter::Bilinear => image::imageops::FilterType::Triangle,
        }
    }
}

/// Clamp a slider value into `[MIN_SCALE_PERCENT, MAX_SCALE_PERCENT]`.
pub fn clamp_percent(percent: u32) -> u32 {
    percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT)
}

/// Target dimensions for a scale by `percent` (already clamped by the caller).
pub fn scaled_dimensions(width: u32, height: u32, percent: u32) -> (u32, u32) {
    let scale = |side: u32| ((side as u64 * percent as u64) / 100).max(1) as u32;
    (scale(width), scale(height))
}

/// Scale a buffer by an integer percentage.
///
/// `percent` is clamped into `[1, 200]`. At 100% the input is returned as an
/// identical copy.
///
/// # Errors
///
/// Returns `BufferError` if the pixels cannot be viewed as an RGB image or
/// the resampled output does not form a valid buffer.
pub fn apply_scale(
    image: &ImageBuffer,
    percent: u32,
    filter: ScaleFilter,
) -> Result<ImageBuffer, BufferError> {
    let percent = clamp_percent(percent);
    let (width, height) = scaled_dimensions(image.width(), image.height(), percent);

    // Fast path: if dimensions match, just clone
    if (width, height) == image.dimensions() {
        return Ok(image.clone());
    }

    let view = image.as_rgb_image()?;
    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    ImageBuffer::from_rgb_image(resized)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
