//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    project: Option<String>,
    files: HashMap<PathBuf, String>,
    current_project: Option<PathBuf>,
    custom_templates: Option<String>,
    settings: Option<String>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file that [`open_project`](Storage::open_project) can read.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, json: impl Into<String>) {
        self.files.insert(path.into(), json.into());
    }

    /// Contents written to a path by save-as.
    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn current_project(&self) -> Option<&Path> {
        self.current_project.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn load_project(&self) -> StorageResult<Option<String>> {
        Ok(self.project.clone())
    }

    fn save_project(&mut self, json: &str) -> StorageResult<()> {
        match &self.current_project {
            Some(path) => {
                self.files.insert(path.clone(), json.to_string());
            }
            None => self.project = Some(json.to_string()),
        }
        Ok(())
    }

    fn save_project_as(&mut self, path: &Path, json: &str) -> StorageResult<()> {
        self.files.insert(path.to_path_buf(), json.to_string());
        self.current_project = Some(path.to_path_buf());
        Ok(())
    }

    fn open_project(&mut self, path: &Path) -> StorageResult<String> {
        let json = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.display().to_string()))?;
        self.current_project = Some(path.to_path_buf());
        Ok(json)
    }

    fn load_custom_templates(&self) -> StorageResult<Option<String>> {
        Ok(self.custom_templates.clone())
    }

    fn save_custom_templates(&mut self, json: &str) -> StorageResult<()> {
        self.custom_templates = Some(json.to_string());
        Ok(())
    }

    fn load_settings(&self) -> StorageResult<Option<String>> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, json: &str) -> StorageResult<()> {
        self.settings = Some(json.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load_project().unwrap(), None);

        storage.save_project("doc").unwrap();
        assert_eq!(storage.load_project().unwrap().as_deref(), Some("doc"));
    }

    #[test]
    fn test_not_found() {
        let mut storage = MemoryStorage::new();
        let result = storage.open_project(Path::new("missing.mbd"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_as_then_save() {
        let mut storage = MemoryStorage::new();
        let path = Path::new("a.mbd");
        storage.save_project_as(path, "one").unwrap();
        storage.save_project("two").unwrap();

        assert_eq!(storage.file(path), Some("two"));
        assert_eq!(storage.load_project().unwrap(), None);
    }

    #[test]
    fn test_open_sets_current_project() {
        let mut storage = MemoryStorage::new();
        storage.insert_file("b.mbd", "content");
        assert_eq!(storage.open_project(Path::new("b.mbd")).unwrap(), "content");
        assert_eq!(storage.current_project(), Some(Path::new("b.mbd")));
    }
}
