use thiserror::Error;

use crate::buffer::BufferError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Failures reported by [`Session`](crate::Session) operations.
///
/// Degenerate crop regions and out-of-range scale values are not errors; the
/// session treats them as no-ops or clamps them.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no image loaded")]
    NoImageLoaded,

    #[error(transparent)]
    InvalidBuffer(#[from] BufferError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
