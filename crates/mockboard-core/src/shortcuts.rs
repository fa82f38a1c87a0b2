//! Keyboard shortcut registry and documentation.

use crate::commands::Action;
use crate::input::Modifiers;

/// A keyboard shortcut definition.
///
/// `command` means Ctrl on Windows/Linux and Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: bool,
    pub shift: bool,
    pub action: Action,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, shift: bool, action: Action) -> Self {
        Self {
            key,
            command,
            shift,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press triggers this shortcut. Keys compare case-insensitively.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.command == modifiers.command() && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        use Action as A;
        Self {
            shortcuts: vec![
                Shortcut::new("N", true, false, A::NewProject),
                Shortcut::new("O", true, false, A::Open),
                Shortcut::new("S", true, false, A::Save),
                Shortcut::new("S", true, true, A::SaveAs),
                Shortcut::new("Z", true, false, A::Undo),
                Shortcut::new("Z", true, true, A::Redo),
                Shortcut::new("Y", true, false, A::Redo),
                Shortcut::new("A", true, false, A::SelectAll),
                Shortcut::new("C", true, false, A::Copy),
                Shortcut::new("X", true, false, A::Cut),
                Shortcut::new("V", true, false, A::Paste),
                Shortcut::new("D", true, false, A::Duplicate),
                Shortcut::new("=", true, false, A::ZoomIn),
                Shortcut::new("-", true, false, A::ZoomOut),
                Shortcut::new("0", true, false, A::ZoomReset),
                Shortcut::new("Delete", false, false, A::Delete),
                Shortcut::new("Backspace", false, false, A::Delete),
                Shortcut::new("Escape", false, false, A::Cancel),
            ],
        }
    }

    /// Get all registered shortcuts.
    pub fn all(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// The action bound to a key press, if any.
    pub fn lookup(&self, key: &str, modifiers: Modifiers) -> Option<Action> {
        // "+" shares a key with "=" on most layouts.
        let key = if key == "+" { "=" } else { key };
        self.shortcuts
            .iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Shortcuts bound to an action, for menu hints.
    pub fn for_action(&self, action: Action) -> Vec<&Shortcut> {
        self.shortcuts.iter().filter(|s| s.action == action).collect()
    }

    /// Render the shortcut table as text.
    pub fn describe(&self) -> String {
        self.shortcuts
            .iter()
            .map(|shortcut| format!("  {:20} {}", shortcut.format(), shortcut.action.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
