//! Points, rectangles and display-to-buffer coordinate mapping.
//!
//! # Coordinate Spaces
//!
//! - **Display space**: the rendered canvas as seen by the pointer. Its size
//!   may differ from the buffer when the host scales the image to fit.
//! - **Buffer space**: one unit per pixel of the [`ImageBuffer`](crate::ImageBuffer).
//!
//! Both have their origin at the top-left corner.

use serde::{Deserialize, Serialize};

/// A pointer position, in whichever space the caller is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by two corners.
///
/// Rectangles built through [`Rect::from_corners`] are normalized: `x1 <= x2`,
/// `y1 <= y2` and no coordinate is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalized rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x).max(0),
            y1: a.y.min(b.y).max(0),
            x2: a.x.max(b.x).max(0),
            y2: a.y.max(b.y).max(0),
        }
    }

    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1).max(0)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Clamp into `[0, width] x [0, height]`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            x1: self.x1.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
            x2: self.x2.clamp(0, max_x),
            y2: self.y2.clamp(0, max_y),
        }
    }
}

/// Size of the rendered canvas in display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-sized display has not been laid out by the host yet.
    pub fn is_realized(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Convert a display-space point into buffer-space pixel coordinates.
///
/// Each axis is scaled by `buffer / display`, rounded to the nearest integer
/// and clamped into `[0, buffer]`. The upper bound is inclusive because a
/// point on the far edge is a valid exclusive rectangle corner.
///
/// Returns `None` while the display has a zero dimension.
pub fn to_buffer_space(
    point: Point,
    display: DisplaySize,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<Point> {
    if !display.is_realized() {
        return None;
    }

    let x = scale_axis(point.x, display.width, buffer_width);
    let y = scale_axis(point.y, display.height, buffer_height);
    Some(Point::new(x, y))
}

/// Map a display-space rectangle into buffer space and re-normalize it.
pub fn map_rect(
    rect: Rect,
    display: DisplaySize,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<Rect> {
    let a = to_buffer_space(
        Point::new(rect.x1, rect.y1),
        display,
        buffer_width,
        buffer_height,
    )?;
    let b = to_buffer_space(
        Point::new(rect.x2, rect.y2),
        display,
        buffer_width,
        buffer_height,
    )?;
    Some(Rect::from_corners(a, b))
}

fn scale_axis(value: i32, display: u32, buffer: u32) -> i32 {
    let scaled = (value as f64 * buffer as f64 / display as f64).round();
    let max = i32::try_from(buffer).unwrap_or(i32::MAX);
    (scaled.clamp(0.0, max as f64)) as i32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
