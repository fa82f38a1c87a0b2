//! Storage abstraction for persistence.
//!
//! Backends move raw JSON text. Parsing happens at the caller, so malformed
//! data can be rejected there without the backend knowing the formats.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSave, DEFAULT_AUTOSAVE_DELAY_MS};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence backend for projects, custom templates and settings.
///
/// `load_*` methods return `Ok(None)` when nothing has been saved yet.
pub trait Storage {
    /// Load the default project.
    fn load_project(&self) -> StorageResult<Option<String>>;

    /// Save to the current project path, or the default project if none is set.
    fn save_project(&mut self, json: &str) -> StorageResult<()>;

    /// Save to `path` and make it the current project path.
    fn save_project_as(&mut self, path: &Path, json: &str) -> StorageResult<()>;

    /// Read the project at `path` and make it the current project path.
    fn open_project(&mut self, path: &Path) -> StorageResult<String>;

    fn load_custom_templates(&self) -> StorageResult<Option<String>>;

    fn save_custom_templates(&mut self, json: &str) -> StorageResult<()>;

    fn load_settings(&self) -> StorageResult<Option<String>>;

    fn save_settings(&mut self, json: &str) -> StorageResult<()>;
}
