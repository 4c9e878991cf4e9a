//! Geometric transforms: cropping and percentage scaling.
//!
//! Both operations are pure functions of their inputs. They never modify the
//! source buffer and always build the complete output before returning, so a
//! caller can swap the result in atomically.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in buffer-space pixels, origin top-left
//! - Scale factors are integer percentages in `[1, 200]`

mod crop;
mod scale;

pub use crop::apply_crop;
pub use scale::{
    apply_scale, clamp_percent, scaled_dimensions, ScaleFilter, MAX_SCALE_PERCENT,
    MIN_SCALE_PERCENT,
};
