//! Host events delivered to [`Session::handle_event`](crate::Session::handle_event).
//!
//! The host translates raw toolkit callbacks (mouse buttons, slider widgets,
//! buttons, key chords) into these values; the session never sees the
//! toolkit itself.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Named edit commands, independent of how the host binds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Crop,
    /// Drop the current selection without cropping.
    ClearSelection,
    Undo,
    Redo,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Pointer button pressed at display coordinates.
    Press { x: i32, y: i32 },
    /// Pointer moved with the button held.
    Drag { x: i32, y: i32 },
    /// Pointer button released.
    Release { x: i32, y: i32 },
    /// Rendered canvas size changed.
    DisplayResized { width: u32, height: u32 },
    /// Resize slider moved; value is a percentage.
    SliderChanged { value: u32 },
    /// Resize slider let go; commits the previewed size.
    SliderReleased,
    Command { command: Command },
}

impl From<Command> for HostEvent {
    fn from(command: Command) -> Self {
        HostEvent::Command { command }
    }
}

/// What an event did, so the host knows whether to redraw or prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Nothing observable changed.
    Ignored,
    /// Only the selection overlay changed; `rect` is what to draw.
    SelectionChanged { rect: Option<Rect> },
    /// The active image changed and should be re-rendered.
    ImageChanged,
    /// The host should ask for a destination and call a save method.
    SaveRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_converts_into_event() {
        assert_eq!(
            HostEvent::from(Command::Undo),
            HostEvent::Command {
                command: Command::Undo
            }
        );
    }
}
