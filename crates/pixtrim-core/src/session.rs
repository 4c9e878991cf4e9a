//! The editing session: one image, its history and the pointer selection.
//!
//! A [`Session`] is owned by exactly one host and driven through `&mut self`
//! calls in event order. Every operation either completes or leaves the
//! session untouched; transforms build their full output before it replaces
//! the active buffer.
//!
//! # Provisional resizes
//!
//! Slider movement calls [`Session::resize`], which previews the scaled image
//! without touching history. Each preview scales the last committed snapshot,
//! so dragging the slider back to 100% restores the original exactly. The
//! preview becomes an undoable entry only through [`Session::commit_resize`]
//! (slider released), or implicitly when a crop is applied on top of it.

use std::path::{Path, PathBuf};

use crate::buffer::ImageBuffer;
use crate::config::SessionConfig;
use crate::decode;
use crate::encode::{FileSink, ImageSink, MemorySink, OutputFormat};
use crate::error::{SessionError, SessionResult};
use crate::event::{Command, EventOutcome, HostEvent};
use crate::geometry::{map_rect, DisplaySize, Point, Rect};
use crate::history::History;
use crate::selection::{Selection, SelectionState};
use crate::transform::{apply_crop, apply_scale, clamp_percent};

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    /// Active working buffer; differs from `history.current()` only while a
    /// resize preview is pending.
    image: Option<ImageBuffer>,
    history: History,
    selection: Selection,
    display: DisplaySize,
    pending_resize: Option<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let config = config.sanitized();
        Self {
            history: History::with_limit(config.history_limit),
            config,
            image: None,
            selection: Selection::new(),
            display: DisplaySize::default(),
            pending_resize: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start editing decoded pixel data with 1, 3 or 4 channels.
    pub fn load(
        &mut self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        channels: u32,
    ) -> SessionResult<()> {
        let image = ImageBuffer::from_raw(width, height, channels, pixels).inspect_err(|err| {
            tracing::warn!(?err, width, height, channels, "rejected raw image");
        })?;
        self.start_document(image);
        Ok(())
    }

    /// Start editing an encoded PNG or JPEG.
    pub fn load_encoded(&mut self, bytes: &[u8]) -> SessionResult<()> {
        let image = decode::decode_image(bytes).inspect_err(|err| {
            tracing::warn!(?err, len = bytes.len(), "failed to decode image bytes");
        })?;
        self.start_document(image);
        Ok(())
    }

    /// Start editing an image file.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        let path = path.as_ref();
        let image = decode::decode_file(path).inspect_err(|err| {
            tracing::warn!(?err, ?path, "failed to load image file");
        })?;
        self.start_document(image);
        Ok(())
    }

    fn start_document(&mut self, image: ImageBuffer) {
        tracing::info!(
            width = image.width(),
            height = image.height(),
            "image loaded"
        );
        self.history.clear();
        self.history.record(image.clone());
        self.image = Some(image);
        self.selection.clear();
        self.pending_resize = None;
    }

    // ------------------------------------------------------------------
    // Pointer selection
    // ------------------------------------------------------------------

    /// Record the rendered canvas size used to map selections to pixels.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display = DisplaySize::new(width, height);
    }

    pub fn display_size(&self) -> DisplaySize {
        self.display
    }

    pub fn press(&mut self, x: i32, y: i32) {
        self.selection.press(Point::new(x, y));
    }

    /// Returns the live selection rectangle while dragging.
    pub fn drag(&mut self, x: i32, y: i32) -> Option<Rect> {
        self.selection.drag(Point::new(x, y))
    }

    /// Returns the committed selection rectangle, if a drag was in progress.
    pub fn release(&mut self, x: i32, y: i32) -> Option<Rect> {
        self.selection.release(Point::new(x, y))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Display-space rectangle the host should draw as the selection overlay.
    pub fn selection_overlay(&self) -> Option<Rect> {
        self.selection.overlay()
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Crop to the committed selection.
    ///
    /// Returns `Ok(false)` without changing anything when there is no
    /// committed selection, the display size is still unknown, or the
    /// selection covers no pixels.
    pub fn crop(&mut self) -> SessionResult<bool> {
        let (width, height) = self.active()?.dimensions();

        let Some(selection) = self.selection.committed() else {
            tracing::debug!("crop ignored: no committed selection");
            return Ok(false);
        };
        let Some(rect) = map_rect(selection, self.display, width, height) else {
            tracing::debug!(display = ?self.display, "crop ignored: display size unknown");
            return Ok(false);
        };
        self.crop_to(rect)
    }

    /// Crop to a rectangle already in buffer-space pixels.
    pub fn crop_to(&mut self, rect: Rect) -> SessionResult<bool> {
        let Some(cropped) = apply_crop(self.active()?, rect) else {
            tracing::debug!(?rect, "crop ignored: empty region");
            return Ok(false);
        };

        tracing::info!(
            ?rect,
            width = cropped.width(),
            height = cropped.height(),
            "crop applied"
        );
        self.commit(cropped);
        self.selection.clear();
        Ok(true)
    }

    /// Preview a resize to `percent` of the last committed snapshot.
    ///
    /// Values outside `[1, 200]` are clamped. History is not touched until
    /// [`Session::commit_resize`].
    pub fn resize(&mut self, percent: u32) -> SessionResult<()> {
        let base = self.history.current().ok_or(SessionError::NoImageLoaded)?;
        let percent = clamp_percent(percent);

        let preview = apply_scale(base, percent, self.config.resize_filter)?;
        tracing::debug!(
            percent,
            width = preview.width(),
            height = preview.height(),
            "resize preview"
        );
        self.pending_resize = (percent != 100).then_some(percent);
        self.image = Some(preview);
        Ok(())
    }

    /// Turn the pending resize preview into a history entry.
    ///
    /// Returns `Ok(false)` if no preview is pending.
    pub fn commit_resize(&mut self) -> SessionResult<bool> {
        let active = self.active()?;
        let Some(percent) = self.pending_resize else {
            return Ok(false);
        };
        let image = active.clone();

        tracing::info!(
            percent,
            width = image.width(),
            height = image.height(),
            "resize committed"
        );
        self.commit(image);
        Ok(true)
    }

    pub fn is_resize_pending(&self) -> bool {
        self.pending_resize.is_some()
    }

    fn commit(&mut self, image: ImageBuffer) {
        self.history.record(image.clone());
        self.image = Some(image);
        self.pending_resize = None;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Step back one edit. A pending resize preview counts as the newest
    /// edit and is discarded first.
    ///
    /// Returns whether the active image changed.
    pub fn undo(&mut self) -> bool {
        if self.discard_preview() {
            tracing::debug!("undo discarded resize preview");
            return true;
        }
        match self.history.undo() {
            Some(previous) => {
                self.image = Some(previous.clone());
                tracing::info!(entries = self.history.len(), "undo applied");
                true
            }
            None => {
                tracing::debug!("undo stack empty");
                false
            }
        }
    }

    /// Re-apply the most recently undone edit, dropping any pending preview.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            tracing::debug!("redo stack empty");
            return false;
        }
        self.discard_preview();
        match self.history.redo() {
            Some(next) => {
                self.image = Some(next.clone());
                tracing::info!(entries = self.history.len(), "redo applied");
                true
            }
            None => false,
        }
    }

    fn discard_preview(&mut self) -> bool {
        if self.pending_resize.take().is_none() {
            return false;
        }
        self.image = self.history.current().cloned();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.pending_resize.is_some() || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of committed snapshots, including the active one.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Write the active image (including a pending preview) to `sink`.
    pub fn save(&self, sink: &mut dyn ImageSink) -> SessionResult<()> {
        let image = self.active()?;
        sink.write_image(image).inspect_err(|err| {
            tracing::warn!(?err, "failed to save image");
        })?;
        tracing::info!(
            width = image.width(),
            height = image.height(),
            "image saved"
        );
        Ok(())
    }

    /// Save to a file. The format follows the extension; a path without one
    /// gets the configured default format and extension.
    ///
    /// Returns the path actually written.
    pub fn save_to_path(&self, path: impl Into<PathBuf>) -> SessionResult<PathBuf> {
        let mut sink = FileSink::new(path, self.config.save_format, self.config.jpeg_quality);
        self.save(&mut sink)?;
        Ok(sink.path().to_path_buf())
    }

    /// Encode the active image to bytes.
    pub fn encode(&self, format: OutputFormat) -> SessionResult<Vec<u8>> {
        let mut sink = MemorySink::new(format, self.config.jpeg_quality);
        self.save(&mut sink)?;
        Ok(sink.into_bytes())
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Apply one host event.
    pub fn handle_event(&mut self, event: HostEvent) -> SessionResult<EventOutcome> {
        let outcome = match event {
            HostEvent::Press { x, y } => {
                self.press(x, y);
                EventOutcome::SelectionChanged {
                    rect: self.selection_overlay(),
                }
            }
            HostEvent::Drag { x, y } => match self.drag(x, y) {
                Some(rect) => EventOutcome::SelectionChanged { rect: Some(rect) },
                None => EventOutcome::Ignored,
            },
            HostEvent::Release { x, y } => match self.release(x, y) {
                Some(rect) => EventOutcome::SelectionChanged { rect: Some(rect) },
                None => EventOutcome::Ignored,
            },
            HostEvent::DisplayResized { width, height } => {
                self.set_display_size(width, height);
                EventOutcome::Ignored
            }
            HostEvent::SliderChanged { value } => {
                self.resize(value)?;
                EventOutcome::ImageChanged
            }
            HostEvent::SliderReleased => changed(self.commit_resize()?),
            HostEvent::Command { command } => self.run_command(command)?,
        };
        Ok(outcome)
    }

    fn run_command(&mut self, command: Command) -> SessionResult<EventOutcome> {
        let outcome = match command {
            Command::Crop => changed(self.crop()?),
            Command::ClearSelection => {
                self.clear_selection();
                EventOutcome::SelectionChanged { rect: None }
            }
            Command::Undo => changed(self.undo()),
            Command::Redo => changed(self.redo()),
            Command::Save => {
                self.active()?;
                EventOutcome::SaveRequested
            }
        };
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The image the host should render.
    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    fn active(&self) -> SessionResult<&ImageBuffer> {
        self.image.as_ref().ok_or(SessionError::NoImageLoaded)
    }
}

fn changed(did_change: bool) -> EventOutcome {
    if did_change {
        EventOutcome::ImageChanged
    } else {
        EventOutcome::Ignored
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
