use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Filesystem-backed storage rooted at an explicit base path.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a temp name and rename into place so readers never see a
        // partially written snapshot.
        let tmp_path = full_path.with_extension("tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }

    fn file_exists(&self, path: &str) -> bool {
        Path::new(&self.base_path).join(path).exists()
    }

    fn rename_file(&self, from: &str, to: &str) -> Result<()> {
        let from_path = Path::new(&self.base_path).join(from);
        let to_path = Path::new(&self.base_path).join(to);

        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::rename(from_path, to_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("data/snapshot.json", b"{}").unwrap();
        assert!(storage.file_exists("data/snapshot.json"));
        assert_eq!(storage.read_file("data/snapshot.json").unwrap(), b"{}");
    }

    #[test]
    fn test_rename_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("data/a.json", b"x").unwrap();
        storage.rename_file("data/a.json", "data/b.json").unwrap();

        assert!(!storage.file_exists("data/a.json"));
        assert!(storage.file_exists("data/b.json"));
    }

    #[test]
    fn test_rename_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.rename_file("data/nope.json", "data/b.json").is_err());
    }
}
