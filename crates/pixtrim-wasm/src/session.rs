//! Editing session bindings for a browser canvas host.
//!
//! The page owns the `<canvas>`, pointer listeners, the resize slider and the
//! download link. It forwards each callback to a [`JsEditSession`] and redraws
//! from [`JsEditSession::image`] whenever a call reports a change.
//!
//! # Example
//!
//! ```typescript
//! const session = JsEditSession.with_config({ resize_filter: 'bilinear' });
//! session.load_encoded(new Uint8Array(await file.arrayBuffer()));
//! session.set_display_size(canvas.width, canvas.height);
//!
//! canvas.onpointerdown = (e) => session.pointer_press(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.pointer_drag(e.offsetX, e.offsetY) && drawOverlay();
//! canvas.onpointerup = (e) => session.pointer_release(e.offsetX, e.offsetY);
//! slider.oninput = () => { session.resize(+slider.value); redraw(); };
//! slider.onchange = () => session.commit_resize();
//! ```

use pixtrim_core::encode::OutputFormat;
use pixtrim_core::{
    resolve_shortcut, EventOutcome, HostEvent, Rect, Session, SessionConfig, SessionError,
    ShortcutKey, ShortcutModifiers,
};
use wasm_bindgen::prelude::*;

use crate::types::JsImageBuffer;

fn to_js_error(err: SessionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct JsEditSession {
    inner: Session,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession {
            inner: Session::default(),
        }
    }

    /// Create a session from a (possibly partial) configuration object.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?
        };
        Ok(JsEditSession {
            inner: Session::new(config),
        })
    }

    /// Load decoded pixels (1, 3 or 4 channels, row-major).
    pub fn load(
        &mut self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        channels: u32,
    ) -> Result<(), JsValue> {
        self.inner
            .load(pixels, width, height, channels)
            .map_err(to_js_error)
    }

    /// Load an encoded PNG or JPEG file.
    pub fn load_encoded(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_encoded(bytes).map_err(to_js_error)
    }

    /// Tell the session how large the canvas currently renders the image.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.inner.set_display_size(width, height);
    }

    pub fn pointer_press(&mut self, x: i32, y: i32) {
        self.inner.press(x, y);
    }

    /// Returns true if the selection overlay should be redrawn.
    pub fn pointer_drag(&mut self, x: i32, y: i32) -> bool {
        self.inner.drag(x, y).is_some()
    }

    /// Returns true if a selection was committed.
    pub fn pointer_release(&mut self, x: i32, y: i32) -> bool {
        self.inner.release(x, y).is_some()
    }

    /// Current overlay rectangle as `[x1, y1, x2, y2]` in canvas coordinates.
    pub fn selection_rect(&self) -> Option<Vec<i32>> {
        self.inner
            .selection_overlay()
            .map(|Rect { x1, y1, x2, y2 }| vec![x1, y1, x2, y2])
    }

    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    /// Crop to the committed selection. Returns false if nothing changed.
    pub fn crop(&mut self) -> Result<bool, JsValue> {
        self.inner.crop().map_err(to_js_error)
    }

    /// Preview a resize (slider `input` event).
    pub fn resize(&mut self, percent: u32) -> Result<(), JsValue> {
        self.inner.resize(percent).map_err(to_js_error)
    }

    /// Commit the previewed resize (slider `change` event).
    pub fn commit_resize(&mut self) -> Result<bool, JsValue> {
        self.inner.commit_resize().map_err(to_js_error)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn history_length(&self) -> usize {
        self.inner.history_len()
    }

    #[wasm_bindgen(getter)]
    pub fn redo_length(&self) -> usize {
        self.inner.redo_len()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Snapshot of the image to render, if one is loaded.
    pub fn image(&self) -> Option<JsImageBuffer> {
        self.inner.image().cloned().map(JsImageBuffer::from_buffer)
    }

    /// Encode the active image. `format` is `"png"` or `"jpeg"`.
    pub fn encode(&self, format: &str) -> Result<js_sys::Uint8Array, JsValue> {
        let format = OutputFormat::from_extension(format)
            .ok_or_else(|| JsValue::from_str(&format!("Unsupported format: {}", format)))?;
        let bytes = self.inner.encode(format).map_err(to_js_error)?;
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }

    /// Apply a host event object such as `{ type: 'press', x: 10, y: 20 }`.
    ///
    /// Returns the outcome object, e.g. `{ type: 'image_changed' }`.
    pub fn handle_event(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: HostEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid host event: {}", e)))?;
        let outcome = self.inner.handle_event(event).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run the command bound to a key chord, if any.
    ///
    /// `key` is a `KeyboardEvent.key` value. Returns the outcome type name
    /// (`"ignored"` when the chord is unbound).
    pub fn handle_shortcut(&mut self, key: &str, ctrl: bool, shift: bool) -> Result<String, JsValue> {
        let Some(key) = shortcut_key(key) else {
            return Ok(outcome_name(EventOutcome::Ignored).to_string());
        };
        let Some(command) = resolve_shortcut(key, ShortcutModifiers::new(ctrl, shift)) else {
            return Ok(outcome_name(EventOutcome::Ignored).to_string());
        };
        let outcome = self
            .inner
            .handle_event(command.into())
            .map_err(to_js_error)?;
        Ok(outcome_name(outcome).to_string())
    }
}

fn shortcut_key(key: &str) -> Option<ShortcutKey> {
    match key {
        "Enter" => Some(ShortcutKey::Enter),
        "Escape" => Some(ShortcutKey::Escape),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ShortcutKey::Character(ch)),
                _ => None,
            }
        }
    }
}

fn outcome_name(outcome: EventOutcome) -> &'static str {
    match outcome {
        EventOutcome::Ignored => "ignored",
        EventOutcome::SelectionChanged { .. } => "selection_changed",
        EventOutcome::ImageChanged => "image_changed",
        EventOutcome::SaveRequested => "save_requested",
    }
}
