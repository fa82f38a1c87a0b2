//! Editor commands, as issued by menus and keyboard shortcuts.

use std::fmt;
use std::path::PathBuf;

/// A request executed by [`Editor::execute`](crate::editor::Editor::execute).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NewProject,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    Undo,
    Redo,
    SelectAll,
    Copy,
    Cut,
    Paste,
    Duplicate,
    Delete,
    BringToFront,
    SendToBack,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    CenterView,
    ToggleGrid,
    ToggleSnap,
    /// Abort the current gesture or label edit.
    Cancel,
}

impl Command {
    /// The action this command performs, without its arguments.
    pub fn action(&self) -> Action {
        match self {
            Command::NewProject => Action::NewProject,
            Command::Open(_) => Action::Open,
            Command::Save => Action::Save,
            Command::SaveAs(_) => Action::SaveAs,
            Command::Undo => Action::Undo,
            Command::Redo => Action::Redo,
            Command::SelectAll => Action::SelectAll,
            Command::Copy => Action::Copy,
            Command::Cut => Action::Cut,
            Command::Paste => Action::Paste,
            Command::Duplicate => Action::Duplicate,
            Command::Delete => Action::Delete,
            Command::BringToFront => Action::BringToFront,
            Command::SendToBack => Action::SendToBack,
            Command::ZoomIn => Action::ZoomIn,
            Command::ZoomOut => Action::ZoomOut,
            Command::ZoomReset => Action::ZoomReset,
            Command::CenterView => Action::CenterView,
            Command::ToggleGrid => Action::ToggleGrid,
            Command::ToggleSnap => Action::ToggleSnap,
            Command::Cancel => Action::Cancel,
        }
    }
}

/// Argument-free command identity, bound to shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NewProject,
    Open,
    Save,
    SaveAs,
    Undo,
    Redo,
    SelectAll,
    Copy,
    Cut,
    Paste,
    Duplicate,
    Delete,
    BringToFront,
    SendToBack,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    CenterView,
    ToggleGrid,
    ToggleSnap,
    Cancel,
}

impl Action {
    /// Build the command directly.
    ///
    /// Returns `None` for actions that need a file path from the host.
    pub fn into_command(self) -> Option<Command> {
        let command = match self {
            Action::Open | Action::SaveAs => return None,
            Action::NewProject => Command::NewProject,
            Action::Save => Command::Save,
            Action::Undo => Command::Undo,
            Action::Redo => Command::Redo,
            Action::SelectAll => Command::SelectAll,
            Action::Copy => Command::Copy,
            Action::Cut => Command::Cut,
            Action::Paste => Command::Paste,
            Action::Duplicate => Command::Duplicate,
            Action::Delete => Command::Delete,
            Action::BringToFront => Command::BringToFront,
            Action::SendToBack => Command::SendToBack,
            Action::ZoomIn => Command::ZoomIn,
            Action::ZoomOut => Command::ZoomOut,
            Action::ZoomReset => Command::ZoomReset,
            Action::CenterView => Command::CenterView,
            Action::ToggleGrid => Command::ToggleGrid,
            Action::ToggleSnap => Command::ToggleSnap,
            Action::Cancel => Command::Cancel,
        };
        Some(command)
    }

    pub fn description(self) -> &'static str {
        match self {
            Action::NewProject => "New project",
            Action::Open => "Open...",
            Action::Save => "Save",
            Action::SaveAs => "Save as...",
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::SelectAll => "Select all elements",
            Action::Copy => "Copy elements",
            Action::Cut => "Cut elements",
            Action::Paste => "Paste elements",
            Action::Duplicate => "Duplicate selected elements",
            Action::Delete => "Delete selected elements",
            Action::BringToFront => "Bring to front",
            Action::SendToBack => "Send to back",
            Action::ZoomIn => "Zoom in",
            Action::ZoomOut => "Zoom out",
            Action::ZoomReset => "Reset zoom",
            Action::CenterView => "Center view",
            Action::ToggleGrid => "Toggle grid",
            Action::ToggleSnap => "Toggle snap to grid",
            Action::Cancel => "Cancel current action",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
