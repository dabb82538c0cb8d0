use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 以目前工作目錄為基準
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

fn unavailable(path: &Path, source: std::io::Error) -> InventoryError {
    InventoryError::DataUnavailable {
        path: path.display().to_string(),
        source,
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        fs::read(&full_path).map_err(|e| unavailable(&full_path, e))
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| unavailable(&full_path, e))?;
        }

        fs::write(&full_path, data).map_err(|e| unavailable(&full_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/dir/cables.json", b"{}").unwrap();
        assert_eq!(storage.read_file("nested/dir/cables.json").unwrap(), b"{}");
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("missing.json").unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_write_under_regular_file_is_data_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        storage.write_file("blocker", b"x").unwrap();

        let err = storage.write_file("blocker/cables.json", b"{}").unwrap_err();
        assert!(err.is_data_unavailable());
    }
}
