//! Error types for canvas operations.

use crate::element::ElementKind;
use crate::storage::StorageError;
use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// Stale element ids are never an error: batch operations skip them.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The kind is not present in the registry.
    #[error("Unknown element kind: {0}")]
    UnknownKind(ElementKind),

    /// No built-in or custom template has this id.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// A project document failed validation and was not applied.
    #[error("Malformed project: {0}")]
    MalformedProject(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Field table export failure.
    #[error("Export error: {0}")]
    Export(String),
}
