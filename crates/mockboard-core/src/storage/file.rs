//! File-based storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::project::PROJECT_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};

const CUSTOM_TEMPLATES_FILE: &str = "custom-templates.json";
const SETTINGS_FILE: &str = "settings.json";

/// File-based storage.
///
/// Keeps the default project, custom templates and settings in a data
/// directory. Projects saved or opened elsewhere become the current project
/// path for later saves.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for application data.
    base_path: PathBuf,
    /// Target of plain saves once a project was saved-as or opened.
    current_project: Option<PathBuf>,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StorageError::Io(format!("Failed to create storage directory: {}", e)))?;
        }
        Ok(Self {
            base_path,
            current_project: None,
        })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/mockboard/`
    /// On Windows: `%LOCALAPPDATA%\mockboard\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("mockboard"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path plain saves go to.
    pub fn current_project(&self) -> Option<&Path> {
        self.current_project.as_deref()
    }

    /// Default project file inside the data directory.
    pub fn default_project_path(&self) -> PathBuf {
        self.base_path.join(format!("current-project.{PROJECT_EXTENSION}"))
    }

    fn read_optional(&self, path: &Path) -> StorageResult<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .map(Some)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn write(&self, path: &Path, json: &str) -> StorageResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        fs::write(path, json).map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

impl Storage for FileStorage {
    fn load_project(&self) -> StorageResult<Option<String>> {
        self.read_optional(&self.default_project_path())
    }

    fn save_project(&mut self, json: &str) -> StorageResult<()> {
        let path = self
            .current_project
            .clone()
            .unwrap_or_else(|| self.default_project_path());
        self.write(&path, json)?;
        log::info!("Saved project to {}", path.display());
        Ok(())
    }

    fn save_project_as(&mut self, path: &Path, json: &str) -> StorageResult<()> {
        self.write(path, json)?;
        self.current_project = Some(path.to_path_buf());
        log::info!("Saved project as {}", path.display());
        Ok(())
    }

    fn open_project(&mut self, path: &Path) -> StorageResult<String> {
        let json = self
            .read_optional(path)?
            .ok_or_else(|| StorageError::NotFound(path.display().to_string()))?;
        self.current_project = Some(path.to_path_buf());
        log::info!("Opened project {}", path.display());
        Ok(json)
    }

    fn load_custom_templates(&self) -> StorageResult<Option<String>> {
        self.read_optional(&self.base_path.join(CUSTOM_TEMPLATES_FILE))
    }

    fn save_custom_templates(&mut self, json: &str) -> StorageResult<()> {
        self.write(&self.base_path.join(CUSTOM_TEMPLATES_FILE), json)
    }

    fn load_settings(&self) -> StorageResult<Option<String>> {
        self.read_optional(&self.base_path.join(SETTINGS_FILE))
    }

    fn save_settings(&mut self, json: &str) -> StorageResult<()> {
        self.write(&self.base_path.join(SETTINGS_FILE), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.load_project().unwrap(), None);
        storage.save_project("{\"a\":1}").unwrap();
        assert_eq!(storage.load_project().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(storage.default_project_path().ends_with("current-project.mbd"));
    }

    #[test]
    fn test_save_as_redirects_later_saves() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data")).unwrap();
        let target = dir.path().join("projects").join("screen.mbd");

        storage.save_project_as(&target, "first").unwrap();
        storage.save_project("second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert_eq!(storage.current_project(), Some(target.as_path()));
        // The default project was never written.
        assert_eq!(storage.load_project().unwrap(), None);
    }

    #[test]
    fn test_open_project() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let path = dir.path().join("other.mbd");

        let missing = storage.open_project(&path);
        assert!(matches!(missing, Err(StorageError::NotFound(_))));
        assert_eq!(storage.current_project(), None);

        fs::write(&path, "content").unwrap();
        assert_eq!(storage.open_project(&path).unwrap(), "content");
        assert_eq!(storage.current_project(), Some(path.as_path()));
    }

    #[test]
    fn test_templates_and_settings() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(storage.load_custom_templates().unwrap(), None);
        storage.save_custom_templates("[]").unwrap();
        storage.save_settings("{}").unwrap();

        assert_eq!(storage.load_custom_templates().unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.load_settings().unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("custom-templates.json").exists());
    }
}
