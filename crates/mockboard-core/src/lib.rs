//! Mockboard Core Library
//!
//! Canvas editing engine for screen mockups and process diagrams: the element
//! model, kind registry, pointer interaction state machine, snapshot
//! undo/redo, project format, templates and persistence.

pub mod camera;
pub mod canvas;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod interaction;
pub mod project;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod storage;
pub mod template;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM, canvas_origin, canvas_to_screen, screen_to_canvas};
pub use canvas::{CanvasBackground, CanvasSettings, CanvasStore};
pub use clipboard::Clipboard;
pub use commands::{Action, Command};
pub use config::EditorConfig;
pub use editor::Editor;
pub use element::{
    Element, ElementId, ElementKind, ElementStyle, ElementUpdate, FieldColumn, FieldMeta, MIN_ELEMENT_SIZE,
    StyleUpdate,
};
pub use error::{CanvasError, CanvasResult};
pub use export::{field_table_csv, field_table_tsv};
pub use history::History;
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use interaction::{InteractionController, InteractionState};
pub use project::ProjectData;
pub use registry::{KindCategory, KindDescriptor, KindRegistry};
pub use scene::{Scene, SceneSnapshot};
pub use selection::ResizeHandle;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use snap::snap;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use template::{Template, TemplateCategory, TemplateLibrary};
