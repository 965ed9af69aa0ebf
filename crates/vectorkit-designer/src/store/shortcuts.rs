use tracing::debug;

use super::{Alignment, EditorStore};

/// Editor keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    FlipHorizontal,
    Align(Alignment),
}

impl Shortcut {
    /// Maps a key press to a command.
    ///
    /// `key` uses DOM key names ("z", "ArrowLeft", ..). `ctrl` is Ctrl on
    /// Linux and Windows or Cmd on macOS.
    pub fn from_key(key: &str, ctrl: bool, shift: bool) -> Option<Self> {
        if !ctrl {
            return None;
        }
        let shortcut = match key {
            "z" | "Z" if shift => Shortcut::Redo,
            "z" | "Z" => Shortcut::Undo,
            "y" | "Y" => Shortcut::Redo,
            "h" | "H" => Shortcut::FlipHorizontal,
            "ArrowLeft" => Shortcut::Align(Alignment::Left),
            "ArrowRight" => Shortcut::Align(Alignment::Right),
            "ArrowUp" => Shortcut::Align(Alignment::Top),
            "ArrowDown" => Shortcut::Align(Alignment::Bottom),
            _ => return None,
        };
        Some(shortcut)
    }

    /// Whether the command only runs with at least one element selected.
    pub fn needs_selection(self) -> bool {
        !matches!(self, Shortcut::Undo | Shortcut::Redo)
    }
}

impl EditorStore {
    /// Runs `shortcut`. Returns whether the document changed.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        if shortcut.needs_selection() && !self.state().has_selection() {
            return false;
        }
        debug!(?shortcut, "Handling shortcut");
        match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::FlipHorizontal => self.flip_horizontally(),
            Shortcut::Align(alignment) => self.align_selected(alignment),
        }
    }
}
