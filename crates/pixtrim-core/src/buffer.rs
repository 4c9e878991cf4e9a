//! The in-memory pixel buffer shared by every transform and the codec boundary.
//!
//! Pixels are stored as 8-bit RGB, row-major, with no padding between rows.
//! A buffer is never mutated after construction; crop and scale produce new
//! instances and the session swaps them in.

use thiserror::Error;

/// Number of bytes per pixel in every [`ImageBuffer`].
pub const CHANNELS: u32 = 3;

/// Errors raised when raw pixel data does not describe a valid buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero, or the pixel count does not fit in memory.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Channel count other than 1 (gray), 3 (RGB) or 4 (RGBA).
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(u32),

    /// Pixel data length doesn't match width * height * channels.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// An RGB image with owned pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer from RGB pixel data.
    ///
    /// # Errors
    ///
    /// Returns `BufferError` if either dimension is zero or the data length is
    /// not `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        let expected = byte_len(width, height, CHANNELS)?;
        if pixels.len() != expected {
            return Err(BufferError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer from decoded pixel data with 1, 3 or 4 channels.
    ///
    /// Grayscale is replicated into all three channels and alpha is dropped,
    /// so the result always satisfies the RGB layout.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, BufferError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        let expected = byte_len(width, height, channels)?;
        if pixels.len() != expected {
            return Err(BufferError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        let rgb = match channels {
            3 => pixels,
            1 => pixels.iter().flat_map(|&v| [v, v, v]).collect(),
            _ => pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };
        Self::new(width, height, rgb)
    }

    /// Create a buffer from an `image::RgbImage`.
    pub(crate) fn from_rgb_image(img: image::RgbImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Borrow the pixels as an `image` crate view for resampling and encoding.
    pub(crate) fn as_rgb_image(
        &self,
    ) -> Result<image::ImageBuffer<image::Rgb<u8>, &[u8]>, BufferError> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice()).ok_or(
            BufferError::InvalidPixelData {
                expected: self.stride() * self.height as usize,
                actual: self.pixels.len(),
            },
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Always [`CHANNELS`].
    pub fn channels(&self) -> u32 {
        CHANNELS
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes in one row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS as usize
    }

    /// RGB value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * CHANNELS as usize;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

/// `width * height * channels`, rejecting zero sides and sizes that overflow `usize`.
fn byte_len(width: u32, height: u32, channels: u32) -> Result<usize, BufferError> {
    let invalid = BufferError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|count| count.checked_mul(channels as usize))
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_buffer() {
        let img = ImageBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]).unwrap();

        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(img.channels(), 3);
        assert_eq!(img.stride(), 300);
        assert_eq!(img.pixels().len(), 15000);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            ImageBuffer::new(0, 10, vec![]),
            Err(BufferError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = ImageBuffer::new(4, 4, vec![0u8; 47]);
        assert_eq!(
            result,
            Err(BufferError::InvalidPixelData {
                expected: 48,
                actual: 47
            })
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert_eq!(
            ImageBuffer::new(u32::MAX, u32::MAX, vec![]),
            Err(BufferError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            })
        );
    }

    #[test]
    fn test_from_raw_rejects_overflowing_dimensions() {
        assert_eq!(
            ImageBuffer::from_raw(u32::MAX, u32::MAX, 4, vec![]),
            Err(BufferError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            })
        );
    }

    #[test]
    fn test_byte_len_wrapping_size_is_not_accepted() {
        // 65536 * 65536 * 3 wraps to 0 in 32-bit arithmetic
        let result = ImageBuffer::new(65536, 65536, vec![]);
        assert!(result.is_err());
        assert_eq!(byte_len(65536, 1, 3), Ok(196_608));
    }

    #[test]
    fn test_from_raw_gray_expands_to_rgb() {
        let img = ImageBuffer::from_raw(2, 1, 1, vec![10, 200]).unwrap();
        assert_eq!(img.pixels(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_from_raw_rgba_drops_alpha() {
        let img = ImageBuffer::from_raw(2, 1, 4, vec![1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_raw_rejects_two_channels() {
        let result = ImageBuffer::from_raw(1, 1, 2, vec![0, 0]);
        assert_eq!(result, Err(BufferError::UnsupportedChannels(2)));
    }

    #[test]
    fn test_from_raw_checks_length_against_declared_channels() {
        let result = ImageBuffer::from_raw(2, 2, 4, vec![0u8; 12]);
        assert!(matches!(
            result,
            Err(BufferError::InvalidPixelData {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_pixel_lookup() {
        let pixels = vec![
            255, 0, 0, 0, 255, 0, // row 0
            0, 0, 255, 9, 9, 9, // row 1
        ];
        let img = ImageBuffer::new(2, 2, pixels).unwrap();

        assert_eq!(img.pixel(1, 0), Some([0, 255, 0]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 255]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn test_rgb_image_round_trip_keeps_layout() {
        let img = ImageBuffer::new(3, 2, (0..18).collect()).unwrap();
        let view = img.as_rgb_image().unwrap();
        assert_eq!(view.get_pixel(2, 1).0, [15, 16, 17]);

        let owned = image::RgbImage::from_raw(3, 2, img.pixels().to_vec()).unwrap();
        assert_eq!(ImageBuffer::from_rgb_image(owned).unwrap(), img);
    }

    #[test]
    fn test_rgb_view_reports_inconsistent_buffer() {
        let broken = ImageBuffer {
            width: 2,
            height: 2,
            pixels: vec![0u8; 3],
        };
        assert!(matches!(
            broken.as_rgb_image(),
            Err(BufferError::InvalidPixelData {
                expected: 12,
                actual: 3
            })
        ));

        let result = crate::transform::apply_scale(&broken, 50, crate::ScaleFilter::Nearest);
        assert!(matches!(result, Err(BufferError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_buffer_error_display() {
        let err = BufferError::UnsupportedChannels(2);
        assert_eq!(err.to_string(), "Unsupported channel count: 2");
    }
}
