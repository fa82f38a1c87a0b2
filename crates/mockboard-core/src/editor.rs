//! Editing session: store, history, clipboard, gestures and persistence wired together.
//!
//! The editor decides when to checkpoint. Every undoable command pushes the
//! scene before it runs; a drag or resize pushes once, on release, and only
//! if the gesture actually changed the scene.

use crate::canvas::CanvasStore;
use crate::clipboard::Clipboard;
use crate::commands::{Action, Command};
use crate::config::EditorConfig;
use crate::element::{ElementId, ElementKind, ElementUpdate, FieldColumn, StyleUpdate};
use crate::error::{CanvasError, CanvasResult};
use crate::history::History;
use crate::input::{Modifiers, PointerEvent};
use crate::interaction::{InteractionController, InteractionState};
use crate::project::ProjectData;
use crate::registry::KindRegistry;
use crate::scene::SceneSnapshot;
use crate::shortcuts::ShortcutRegistry;
use crate::storage::{AutoSave, Storage};
use crate::template::TemplateLibrary;
use kurbo::{Point, Size, Vec2};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// A single-user editing session over a storage backend.
#[derive(Debug)]
pub struct Editor<S: Storage> {
    store: CanvasStore,
    history: History,
    clipboard: Clipboard,
    controller: InteractionController,
    shortcuts: ShortcutRegistry,
    templates: TemplateLibrary,
    storage: S,
    config: EditorConfig,
    autosave: AutoSave,
    /// Scene before the drag or resize in flight.
    gesture_checkpoint: Option<SceneSnapshot>,
}

impl<S: Storage> Editor<S> {
    /// Create an empty session with the given settings.
    pub fn new(storage: S, config: EditorConfig) -> Self {
        let store = CanvasStore::new(Arc::new(KindRegistry::builtin()))
            .with_duplicate_offset(config.duplicate_offset)
            .with_settings(config.canvas.clone());
        let controller = InteractionController::new()
            .with_handle_tolerance(config.handle_tolerance)
            .with_zoom_step(config.zoom_step);
        Self {
            store,
            history: History::new(config.history_depth),
            clipboard: Clipboard::new(),
            controller,
            shortcuts: ShortcutRegistry::new(),
            templates: TemplateLibrary::builtin(),
            autosave: AutoSave::new(config.autosave_delay()),
            storage,
            config,
            gesture_checkpoint: None,
        }
    }

    /// Restore a session from storage: settings, custom templates and the last project.
    ///
    /// Missing or malformed data falls back to defaults; nothing here fails.
    pub fn with_storage(storage: S) -> Self {
        let config = match storage.load_settings() {
            Ok(Some(json)) => EditorConfig::from_json_or_default(&json),
            Ok(None) => EditorConfig::default(),
            Err(err) => {
                log::warn!("Failed to load settings: {err}");
                EditorConfig::default()
            }
        };
        let mut editor = Self::new(storage, config);

        match editor.storage.load_custom_templates() {
            Ok(Some(json)) => editor.templates.load_custom_json(&json),
            Ok(None) => {}
            Err(err) => log::warn!("Failed to load custom templates: {err}"),
        }

        match editor.storage.load_project() {
            Ok(Some(json)) => match ProjectData::from_json(&json).and_then(|data| editor.store.load_project(data)) {
                Ok(()) => log::info!("Restored last project"),
                Err(err) => log::warn!("Ignoring saved project: {err}"),
            },
            Ok(None) => {}
            Err(err) => log::warn!("Failed to load project: {err}"),
        }
        editor
    }

    pub fn store(&self) -> &CanvasStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Whether there are changes not yet written to storage.
    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.controller.set_viewport(viewport);
    }

    /// Push the current scene onto the undo history.
    ///
    /// A drag or resize in flight is recorded first, so its step sits below
    /// this one.
    pub fn checkpoint(&mut self) {
        self.flush_gesture();
        self.history.push_snapshot(self.store.snapshot());
    }

    fn flush_gesture(&mut self) {
        if let Some(checkpoint) = self.gesture_checkpoint.take() {
            if checkpoint != self.store.snapshot() {
                self.history.push_snapshot(checkpoint);
            }
        }
    }

    /// Restart the gesture checkpoint after a command ran mid-gesture.
    fn rebase_gesture(&mut self) {
        if self.controller.is_manipulating() && self.gesture_checkpoint.is_none() {
            self.gesture_checkpoint = Some(self.store.snapshot());
        }
    }

    fn touch(&mut self) {
        self.autosave.mark_dirty(Instant::now());
    }

    fn can_delete(&self) -> bool {
        !self.store.selection().is_empty() && self.store.editing().is_none()
    }

    /// Run one command.
    pub fn execute(&mut self, command: Command) -> CanvasResult<()> {
        log::debug!("Execute {:?}", command);
        match command {
            Command::NewProject => {
                self.controller.cancel(&mut self.store);
                self.checkpoint();
                self.store.clear_canvas();
                self.touch();
            }
            Command::Open(path) => self.open(&path)?,
            Command::Save => self.save()?,
            Command::SaveAs(path) => self.save_as(&path)?,
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SelectAll => self.store.select_all(),
            Command::Copy => {
                self.clipboard.copy(&self.store);
            }
            Command::Cut => {
                if self.can_delete() {
                    self.clipboard.copy(&self.store);
                    self.checkpoint();
                    let ids = self.store.selection().to_vec();
                    self.store.remove(&ids);
                    self.touch();
                }
            }
            Command::Paste => {
                if !self.clipboard.is_empty() {
                    self.checkpoint();
                    self.clipboard.paste(&mut self.store);
                    self.touch();
                }
            }
            Command::Duplicate => {
                if !self.store.selection().is_empty() {
                    self.checkpoint();
                    let ids = self.store.selection().to_vec();
                    self.store.duplicate(&ids);
                    self.touch();
                }
            }
            Command::Delete => {
                if self.can_delete() {
                    self.checkpoint();
                    let ids = self.store.selection().to_vec();
                    self.store.remove(&ids);
                    self.touch();
                }
            }
            Command::BringToFront => {
                if !self.store.selection().is_empty() {
                    self.checkpoint();
                    let ids = self.store.selection().to_vec();
                    self.store.bring_to_front(&ids);
                    self.touch();
                }
            }
            Command::SendToBack => {
                if !self.store.selection().is_empty() {
                    self.checkpoint();
                    let ids = self.store.selection().to_vec();
                    self.store.send_to_back(&ids);
                    self.touch();
                }
            }
            Command::ZoomIn => self.store.set_zoom(self.store.zoom() + self.config.zoom_step),
            Command::ZoomOut => self.store.set_zoom(self.store.zoom() - self.config.zoom_step),
            Command::ZoomReset => self.store.set_zoom(1.0),
            Command::CenterView => self.store.set_pan_offset(Vec2::ZERO),
            Command::ToggleGrid => {
                let visible = !self.store.settings().grid_visible;
                self.store.set_grid_visible(visible);
                self.touch();
            }
            Command::ToggleSnap => {
                let snap = !self.store.settings().snap_to_grid;
                self.store.set_snap_to_grid(snap);
                self.touch();
            }
            Command::Cancel => {
                // Cancelled gestures put the scene back, so their checkpoint is dropped.
                self.gesture_checkpoint = None;
                self.controller.cancel(&mut self.store);
            }
        }
        self.controller.sync(&self.store);
        self.rebase_gesture();
        Ok(())
    }

    /// Handle a key press. Returns the bound action, if any.
    ///
    /// Actions that need a path from the host (open, save-as) are returned
    /// without being executed.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> CanvasResult<Option<Action>> {
        let Some(action) = self.shortcuts.lookup(key, modifiers) else {
            return Ok(None);
        };
        if let Some(command) = action.into_command() {
            self.execute(command)?;
        }
        Ok(Some(action))
    }

    /// Feed one pointer event through the interaction controller.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> InteractionState {
        let was_manipulating = self.controller.is_manipulating();
        let before = matches!(event, PointerEvent::Down { .. }).then(|| self.store.snapshot());

        let state = self.controller.handle_event(&mut self.store, event);

        if !was_manipulating && self.controller.is_manipulating() {
            self.gesture_checkpoint = before;
        } else if was_manipulating && !self.controller.is_manipulating() {
            if let Some(checkpoint) = self.gesture_checkpoint.take() {
                if checkpoint != self.store.snapshot() {
                    self.history.push_snapshot(checkpoint);
                    self.touch();
                }
            }
        }
        state
    }

    /// Write the edited label and leave edit mode.
    pub fn commit_label(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = self
            .store
            .editing()
            .and_then(|id| self.store.get(id))
            .is_some_and(|el| el.label != text);
        if changed {
            self.checkpoint();
        }
        let committed = self.controller.commit_label(&mut self.store, text);
        if committed && changed {
            self.touch();
        }
        committed
    }

    /// Add an element of `kind` at a canvas position.
    pub fn add_element(&mut self, kind: ElementKind, position: Point) -> CanvasResult<ElementId> {
        self.flush_gesture();
        let before = self.store.snapshot();
        let id = self.store.add(kind, position);
        self.rebase_gesture();
        let id = id?;
        self.history.push_snapshot(before);
        self.touch();
        Ok(id)
    }

    /// Property edit, without a checkpoint.
    pub fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        let updated = self.store.update(id, update);
        if updated {
            self.touch();
        }
        updated
    }

    /// Style edit, without a checkpoint.
    pub fn update_style(&mut self, id: ElementId, update: &StyleUpdate) -> bool {
        let updated = self.store.update_style(id, update);
        if updated {
            self.touch();
        }
        updated
    }

    /// Field table cell edit, without a checkpoint.
    pub fn set_field_meta(&mut self, id: ElementId, column: FieldColumn, value: impl Into<String>) -> bool {
        let updated = self.store.set_field_meta(id, column, value);
        if updated {
            self.touch();
        }
        updated
    }

    fn undo(&mut self) {
        self.controller.cancel(&mut self.store);
        self.gesture_checkpoint = None;
        if let Some(snapshot) = self.history.undo(self.store.snapshot()) {
            self.store.restore(snapshot);
            self.touch();
        }
    }

    fn redo(&mut self) {
        self.controller.cancel(&mut self.store);
        self.gesture_checkpoint = None;
        if let Some(snapshot) = self.history.redo(self.store.snapshot()) {
            self.store.restore(snapshot);
            self.touch();
        }
    }

    fn open(&mut self, path: &Path) -> CanvasResult<()> {
        let json = self.storage.open_project(path)?;
        let data = ProjectData::from_json(&json)?;
        self.controller.cancel(&mut self.store);
        self.gesture_checkpoint = None;
        self.store.load_project(data)?;
        self.history.clear();
        self.autosave.mark_saved();
        log::info!("Opened {}", path.display());
        Ok(())
    }

    fn save(&mut self) -> CanvasResult<()> {
        let json = self.store.project_data().to_json()?;
        self.storage.save_project(&json)?;
        self.autosave.mark_saved();
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> CanvasResult<()> {
        let json = self.store.project_data().to_json()?;
        self.storage.save_project_as(path, &json)?;
        self.autosave.mark_saved();
        Ok(())
    }

    /// Save if the debounce delay has passed since the last change. Returns whether it saved.
    ///
    /// A failed save stays dirty and is retried on a later tick.
    pub fn tick(&mut self, now: Instant) -> CanvasResult<bool> {
        if !self.autosave.should_save(now) {
            return Ok(false);
        }
        self.save()?;
        log::debug!("Auto-saved");
        Ok(true)
    }

    /// Replace the scene with a fresh copy of a template.
    pub fn load_template(&mut self, id: &str) -> CanvasResult<()> {
        let template = self
            .templates
            .find(id)
            .ok_or_else(|| CanvasError::UnknownTemplate(id.to_string()))?;
        let elements = template.instantiate();
        let size = template.canvas_width.zip(template.canvas_height);
        let name = template.name.clone();

        self.controller.cancel(&mut self.store);
        self.checkpoint();
        if let Some((width, height)) = size {
            self.store.set_canvas_size(width, height);
        }
        self.store.replace_all(elements);
        self.touch();
        log::info!("Loaded template {name}");
        Ok(())
    }

    /// Save the current scene as a custom template and persist the custom list.
    pub fn save_as_template(&mut self, name: &str, description: &str) -> CanvasResult<String> {
        let elements: Vec<_> = self.store.ordered_elements().cloned().collect();
        let settings = self.store.settings();
        let id = self
            .templates
            .save_as_template(name, description, elements, settings.width, settings.height);
        self.persist_templates()?;
        Ok(id)
    }

    /// Delete a custom template and persist the custom list.
    pub fn delete_custom_template(&mut self, id: &str) -> CanvasResult<bool> {
        let deleted = self.templates.delete_custom(id);
        if deleted {
            self.persist_templates()?;
        }
        Ok(deleted)
    }

    fn persist_templates(&mut self) -> CanvasResult<()> {
        let json = self.templates.custom_to_json()?;
        self.storage.save_custom_templates(&json)?;
        Ok(())
    }

    /// Write the editor settings through storage.
    pub fn save_settings(&mut self) -> CanvasResult<()> {
        let json = self.config.to_json()?;
        self.storage.save_settings(&json)?;
        Ok(())
    }

    /// System clipboard text for the current clipboard contents.
    pub fn clipboard_payload(&self) -> CanvasResult<String> {
        Ok(self.clipboard.to_payload()?)
    }

    /// Replace the clipboard from system clipboard text.
    pub fn set_clipboard_payload(&mut self, payload: &str) {
        self.clipboard = Clipboard::from_payload(payload);
    }
}
