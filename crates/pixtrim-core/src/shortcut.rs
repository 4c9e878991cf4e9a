//! Conventional key chords for the named edit commands.
//!
//! Hosts forward key presses here and dispatch the resulting [`Command`];
//! binding itself stays in the host toolkit.

use crate::event::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }

    pub const fn ctrl() -> Self {
        Self::new(true, false)
    }
}

/// Resolve a key chord to an edit command.
///
/// Ctrl+Z undoes, Ctrl+Y or Ctrl+Shift+Z redoes, Ctrl+S saves, Enter applies
/// the crop and Escape drops the selection. Letters are matched case-insensitively.
pub fn resolve_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<Command> {
    match key {
        ShortcutKey::Enter if !modifiers.ctrl => Some(Command::Crop),
        ShortcutKey::Escape => Some(Command::ClearSelection),
        ShortcutKey::Character(ch) if modifiers.ctrl => {
            match (ch.to_ascii_lowercase(), modifiers.shift) {
                ('z', false) => Some(Command::Undo),
                ('z', true) | ('y', false) => Some(Command::Redo),
                ('s', false) => Some(Command::Save),
                _ => None,
            }
        }
        _ => None,
    }
}
