//! PNG/JPEG encoding and the sinks the session saves through.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::ImageBuffer;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The codec rejected the pixel data.
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },

    /// Writing the encoded bytes failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// File format written on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Format implied by a file extension, if it is one we can write.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Encode a buffer to bytes.
///
/// `quality` only applies to JPEG and is clamped to 1-100.
pub fn encode_image(
    image: &ImageBuffer,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    let (width, height) = image.dimensions();

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(
            image.pixels(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(image.pixels(), width, height, ExtendedColorType::Rgb8),
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

/// Destination for a saved image.
pub trait ImageSink {
    fn write_image(&mut self, image: &ImageBuffer) -> Result<(), EncodeError>;
}

/// Writes the encoded image to a file.
///
/// The format comes from the path extension; paths without a known extension
/// fall back to the configured default and get that extension appended.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
    quality: u8,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, default_format: OutputFormat, quality: u8) -> Self {
        let mut path = path.into();
        let format = match OutputFormat::from_path(&path) {
            Some(format) => format,
            None => {
                let mut name = path.clone().into_os_string();
                name.push(".");
                name.push(default_format.extension());
                path = PathBuf::from(name);
                default_format
            }
        };
        Self {
            path,
            format,
            quality,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl ImageSink for FileSink {
    fn write_image(&mut self, image: &ImageBuffer) -> Result<(), EncodeError> {
        let bytes = encode_image(image, self.format, self.quality)?;
        // Encode fully before touching the file so a codec failure leaves it alone
        let mut file = std::fs::File::create(&self.path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// Keeps the encoded bytes of the last written image.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    format: OutputFormat,
    quality: u8,
    bytes: Vec<u8>,
}

impl MemorySink {
    pub fn new(format: OutputFormat, quality: u8) -> Self {
        Self {
            format,
            quality,
            bytes: Vec::new(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ImageSink for MemorySink {
    fn write_image(&mut self, image: &ImageBuffer) -> Result<(), EncodeError> {
        self.bytes = encode_image(image, self.format, self.quality)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32) -> ImageBuffer {
        ImageBuffer::new(width, height, vec![128u8; (width * height * 3) as usize]).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixtrim-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_image(&gray(10, 10), OutputFormat::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_image(&gray(100, 100), OutputFormat::Jpeg, 90).unwrap();

        // SOI at the start, EOI at the end
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        assert!(encode_image(&gray(10, 10), OutputFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&gray(10, 10), OutputFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_file_sink_uses_extension() {
        let sink = FileSink::new("/tmp/out.jpeg", OutputFormat::Png, 90);
        assert_eq!(sink.format(), OutputFormat::Jpeg);
        assert_eq!(sink.path(), Path::new("/tmp/out.jpeg"));
    }

    #[test]
    fn test_file_sink_appends_default_extension() {
        let sink = FileSink::new("/tmp/out", OutputFormat::Png, 90);
        assert_eq!(sink.format(), OutputFormat::Png);
        assert_eq!(sink.path(), Path::new("/tmp/out.png"));
    }

    #[test]
    fn test_file_sink_writes_png() {
        let path = temp_path("sink.png");
        let mut sink = FileSink::new(&path, OutputFormat::Png, 90);
        sink.write_image(&gray(4, 3)).unwrap();

        let written = std::fs::read(&path).unwrap();
        let decoded = crate::decode::decode_image(&written).unwrap();
        assert_eq!(decoded, gray(4, 3));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_sink_reports_io_error() {
        let mut sink = FileSink::new("/nonexistent/pixtrim/dir/out.png", OutputFormat::Png, 90);
        let result = sink.write_image(&gray(2, 2));
        assert!(matches!(result, Err(EncodeError::IoError(_))));
    }

    #[test]
    fn test_memory_sink_keeps_bytes() {
        let mut sink = MemorySink::new(OutputFormat::Jpeg, 80);
        assert!(sink.bytes().is_empty());

        sink.write_image(&gray(8, 8)).unwrap();
        assert_eq!(&sink.bytes()[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
    }
}
