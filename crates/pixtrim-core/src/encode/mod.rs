//! Encoder boundary: [`ImageBuffer`](crate::ImageBuffer) out to PNG or JPEG.
//!
//! The session never touches files directly; it hands the active buffer to an
//! [`ImageSink`]. [`FileSink`] writes to disk, [`MemorySink`] keeps the encoded
//! bytes for hosts that do their own I/O (such as the browser bindings).

mod sink;

pub use sink::{encode_image, EncodeError, FileSink, ImageSink, MemorySink, OutputFormat};
