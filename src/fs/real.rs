use super::{FileMetadata, FileSystem, FileType};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path).with_context(|| format!("Failed to get metadata for {:?}", path))?;
        let file_type = if meta.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };

        Ok(FileMetadata {
            size: meta.len(),
            file_type,
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Failed to write file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let dir = temp.path().join("nested/state");
        let file = dir.join("plan.yaml");

        fs.create_dir_all(&dir).unwrap();
        fs.write(&file, "kind: plan\n").unwrap();

        assert!(fs.is_dir(&dir));
        assert!(fs.is_file(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "kind: plan\n");
        assert_eq!(fs.metadata(&file).unwrap().len(), 11);
    }

    #[test]
    fn test_missing_file_errors_with_path() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let missing = temp.path().join("absent.txt");

        assert!(!fs.exists(&missing));
        let err = fs.read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
