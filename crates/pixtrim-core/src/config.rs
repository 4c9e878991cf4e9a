//! Session configuration.
//!
//! Every field has a default, so hosts may pass a partial object (or nothing).

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;
use crate::transform::ScaleFilter;

/// Default JPEG quality, matching common editor export presets.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Filter used for slider resizes.
    pub resize_filter: ScaleFilter,
    /// Format used when a save path has no recognizable extension.
    pub save_format: OutputFormat,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Maximum number of history entries kept; `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resize_filter: ScaleFilter::default(),
            save_format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            history_limit: None,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with out-of-range values pulled back into range.
    pub fn sanitized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.history_limit = self.history_limit.map(|limit| limit.max(1));
        self
    }
}
