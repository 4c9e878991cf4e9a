//! Format-sniffing decoder with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::buffer::ImageBuffer;

/// Decode encoded image bytes into an RGB buffer, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(ImageBuffer::from_rgb_image(rgb_img)?)
}

/// Read and decode an image file.
pub fn decode_file(path: impl AsRef<Path>) -> Result<ImageBuffer, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let image = decode_image(&bytes)?;
    tracing::debug!(?path, width = image.width(), height = image.height(), "decoded file");
    Ok(image)
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_image, OutputFormat};

    fn sample() -> ImageBuffer {
        let pixels = vec![
            255, 0, 0, 0, 255, 0, 0, 0, 255, // row 0
            10, 20, 30, 40, 50, 60, 70, 80, 90, // row 1
        ];
        ImageBuffer::new(3, 2, pixels).unwrap()
    }

    #[test]
    fn test_decode_png_round_trip_is_lossless() {
        let png = encode_image(&sample(), OutputFormat::Png, 90).unwrap();
        let decoded = decode_image(&png).unwrap();

        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_jpeg_keeps_dimensions() {
        let jpeg = encode_image(&sample(), OutputFormat::Jpeg, 95).unwrap();
        let decoded = decode_image(&jpeg).unwrap();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.channels(), 3);
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_image(&sample(), OutputFormat::Png, 90).unwrap();
        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_file("/nonexistent/pixtrim/missing.png");
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let png = encode_image(&sample(), OutputFormat::Png, 90).unwrap();
        assert_eq!(extract_orientation(&png), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::Rotate90CW);

        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(
            DynamicImage::ImageRgb8(rgb_img),
            Orientation::FlipHorizontal,
        )
        .into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
