//! Rubber-band selection driven by pointer press, drag and release.
//!
//! ```text
//! Idle --press--> Dragging --release--> Committed
//!  ^                 |  ^                   |
//!  |                 drag                   |
//!  +------clear------+---------press--------+
//! ```
//!
//! A press in any state starts a new drag and discards the previous one.
//! All coordinates are display space; mapping to the buffer happens at crop
//! time.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        current: Point,
    },
    Committed {
        rect: Rect,
    },
}

#[derive(Debug, Default)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Start a new drag at `point`.
    pub fn press(&mut self, point: Point) {
        if !matches!(self.state, SelectionState::Idle) {
            tracing::debug!(from = ?self.state, "selection restarted by press");
        }
        self.state = SelectionState::Dragging {
            origin: point,
            current: point,
        };
    }

    /// Update the live rectangle. Returns it for overlay rendering, or `None`
    /// when no drag is in progress.
    pub fn drag(&mut self, point: Point) -> Option<Rect> {
        match &mut self.state {
            SelectionState::Dragging { origin, current } => {
                *current = point;
                Some(Rect::from_corners(*origin, point))
            }
            _ => None,
        }
    }

    /// Finish the drag and commit its normalized rectangle.
    pub fn release(&mut self, point: Point) -> Option<Rect> {
        let SelectionState::Dragging { origin, .. } = self.state else {
            return None;
        };
        let rect = Rect::from_corners(origin, point);
        tracing::debug!(?rect, "selection committed");
        self.state = SelectionState::Committed { rect };
        Some(rect)
    }

    /// The rectangle to draw right now: live while dragging, fixed once committed.
    pub fn overlay(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { origin, current } => Some(Rect::from_corners(origin, current)),
            SelectionState::Committed { rect } => Some(rect),
        }
    }

    pub fn committed(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Committed { rect } => Some(rect),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }
}
