//! Filesystem store: one JSON file per key under a data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::KvStore;
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct FileStore {
    root_dir: PathBuf,
}

impl FileStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Keys map to `{root}/{key}.json`; anything that could escape the root
    /// directory is rejected.
    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root_dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_owned(),
        source,
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    /// Writes to a temp file and renames it over the target.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path(key)?;
        tokio::fs::create_dir_all(&self.root_dir)
            .await
            .map_err(io_error(key))?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&tmp, &path, value).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::debug!(key, error = %cleanup, "temp file not removed");
            }
            return Err(io_error(key)(e));
        }
        tracing::debug!(key, bytes = value.len(), "store value written");
        Ok(())
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, value: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(value).await?;
    file.flush().await?;
    drop(file);
    tokio::fs::rename(tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("saved_places", b"[\"a\"]").await.unwrap();
        let data = store.get("saved_places").await.unwrap();
        assert_eq!(data, Some(b"[\"a\"]".to_vec()));
        assert!(tmp.path().join("saved_places.json").exists());
        assert!(!tmp.path().join("saved_places.json.tmp").exists());
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn creates_root_directory_on_first_write() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.set("cached_location", b"{}").await.unwrap();
        assert!(root.join("cached_location.json").exists());
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("k", b"first").await.unwrap();
        store.set("k", b"second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        // A non-empty directory at the target path makes the rename fail.
        let blocker = tmp.path().join("k.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("inner"), b"x").unwrap();

        let err = store.set("k", b"value").await.unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!tmp.path().join("k.json.tmp").exists());
        assert!(blocker.is_dir());
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let err = store.set("../escape", b"x").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
        assert!(matches!(
            store.get("a/b").await.unwrap_err(),
            StoreError::InvalidKey(_)
        ));
    }
}
