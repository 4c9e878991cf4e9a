//! pixtrim core - interactive crop/scale editing session
//!
//! This crate holds everything with real invariants in the editor: the RGB
//! pixel buffer, display-to-buffer coordinate mapping, the pointer selection
//! state machine, crop and scale transforms, and linear undo/redo history.
//! Rendering, event capture and file dialogs belong to the host.
//!
//! # Usage
//!
//! ```ignore
//! use pixtrim_core::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.load_path("photo.jpg")?;
//! session.set_display_size(600, 400);
//!
//! session.press(40, 30);
//! session.drag(200, 150);
//! session.release(320, 240);
//! session.crop()?;
//!
//! session.undo();
//! session.save_to_path("photo-edited.png")?;
//! ```

pub mod buffer;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod selection;
pub mod session;
pub mod shortcut;
pub mod transform;

pub use buffer::{BufferError, ImageBuffer, CHANNELS};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use event::{Command, EventOutcome, HostEvent};
pub use geometry::{map_rect, to_buffer_space, DisplaySize, Point, Rect};
pub use history::History;
pub use selection::{Selection, SelectionState};
pub use session::Session;
pub use shortcut::{resolve_shortcut, ShortcutKey, ShortcutModifiers};
pub use transform::{apply_crop, apply_scale, ScaleFilter};
