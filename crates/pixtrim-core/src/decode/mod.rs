//! Decoder boundary: encoded image bytes or files in, [`ImageBuffer`](crate::ImageBuffer) out.
//!
//! Any format enabled on the `image` crate is accepted (PNG and JPEG in this
//! workspace). EXIF orientation is applied so the buffer matches what the
//! user expects to see.

mod reader;
mod types;

pub use reader::{decode_file, decode_image};
pub use types::{DecodeError, Orientation};
