use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StorageError;
use crate::storage_traits::{BuildStore, StorageResult, StoreScope};

/// Filesystem-backed build store, one JSON document per scope.
///
/// Layout: `<root>/builds/<scope>.json`
#[derive(Debug, Clone)]
pub struct FsBuildStore {
    builds_dir: PathBuf,
}

impl FsBuildStore {
    /// Create a new `FsBuildStore` rooted at `root`. Creates `root/builds/` if needed.
    pub fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let builds_dir = root.as_ref().join("builds");
        fs::create_dir_all(&builds_dir)?;
        Ok(Self { builds_dir })
    }

    /// Path of the document backing `scope`.
    pub fn document_path(&self, scope: &StoreScope) -> PathBuf {
        self.builds_dir.join(format!("{}.json", scope.as_str()))
    }
}

fn read_document(path: &Path) -> StorageResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::Io(e)),
    }
}

fn write_document(dir: &Path, path: &Path, document: &[u8]) -> StorageResult<()> {
    // Atomic write: temp file in the same directory, then rename over the target.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(document)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn remove_document(path: &Path) -> StorageResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::Io(e)),
    }
}

async fn blocking<T, F>(op: F) -> StorageResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StorageResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StorageError::Unavailable(format!("blocking file task failed: {e}")))?
}

#[async_trait]
impl BuildStore for FsBuildStore {
    async fn read(&self, scope: &StoreScope) -> StorageResult<Option<Vec<u8>>> {
        let path = self.document_path(scope);
        blocking(move || read_document(&path)).await
    }

    async fn write(&self, scope: &StoreScope, document: &[u8]) -> StorageResult<()> {
        let path = self.document_path(scope);
        let dir = self.builds_dir.clone();
        let document = document.to_vec();
        debug!(path = %path.display(), bytes = document.len(), "writing build document");
        blocking(move || write_document(&dir, &path, &document)).await
    }

    async fn remove(&self, scope: &StoreScope) -> StorageResult<()> {
        let path = self.document_path(scope);
        blocking(move || remove_document(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> (tempfile::TempDir, FsBuildStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBuildStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn document_lands_under_builds_dir() {
        let (dir, store) = make_store();
        let scope = StoreScope::new("acme-store").unwrap();
        store.write(&scope, b"[]").await.unwrap();

        let expected = dir.path().join("builds").join("acme-store.json");
        assert_eq!(store.document_path(&scope), expected);
        assert_eq!(std::fs::read(expected).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn overwrite_leaves_no_temp_files() {
        let (dir, store) = make_store();
        let scope = StoreScope::new("acme").unwrap();
        store.write(&scope, b"[1]").await.unwrap();
        store.write(&scope, b"[1,2]").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("builds"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.read(&scope).await.unwrap().unwrap(), b"[1,2]");
    }

    #[tokio::test]
    async fn reopening_sees_previous_writes() {
        let (dir, store) = make_store();
        let scope = StoreScope::new("acme").unwrap();
        store.write(&scope, b"persisted").await.unwrap();
        drop(store);

        let reopened = FsBuildStore::new(dir.path()).unwrap();
        assert_eq!(reopened.read(&scope).await.unwrap().unwrap(), b"persisted");
    }

    #[tokio::test]
    async fn remove_missing_is_noop() {
        let (_dir, store) = make_store();
        let scope = StoreScope::new("never-written").unwrap();
        store.remove(&scope).await.unwrap();
        assert!(store.read(&scope).await.unwrap().is_none());
    }
}
