use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 本地檔案系統儲存，所有路徑皆相對於 `base_path`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }

    async fn ensure_parent(full_path: &Path) -> Result<()> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

impl Storage for LocalStorage {
    type Writer = fs::File;

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);
        Self::ensure_parent(&full_path).await?;

        fs::write(full_path, data).await?;
        Ok(())
    }

    async fn create_dir(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.full_path(path)).await?;
        Ok(())
    }

    async fn create_file(&self, path: &str) -> Result<Self::Writer> {
        let full_path = self.full_path(path);
        Self::ensure_parent(&full_path).await?;

        Ok(fs::File::create(full_path).await?)
    }

    async fn remove_file(&self, path: &str) -> Result<bool> {
        match fs::remove_file(self.full_path(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_write_file_creates_parents_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());

        storage.write_file("metadata/a/b.js", b"first").await.unwrap();
        storage.write_file("metadata/a/b.js", b"second").await.unwrap();

        let content = std::fs::read(temp_dir.path().join("metadata/a/b.js")).unwrap();
        assert_eq!(content, b"second");
    }

    #[tokio::test]
    async fn test_create_and_remove_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());

        let mut writer = storage.create_file("steps/10/b.mp3").await.unwrap();
        writer.write_all(b"partial").await.unwrap();
        writer.flush().await.unwrap();
        drop(writer);

        assert!(temp_dir.path().join("steps/10/b.mp3").exists());
        assert!(storage.remove_file("steps/10/b.mp3").await.unwrap());
        assert!(!temp_dir.path().join("steps/10/b.mp3").exists());
        assert!(!storage.remove_file("steps/10/b.mp3").await.unwrap());
    }
}
