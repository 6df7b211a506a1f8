//! In-memory build store
//!
//! `MemoryBuildStore` satisfies the `BuildStore` contract without touching
//! disk. It can also model the failure modes of browser-style key-value
//! storage: a byte quota per scope and a switch that takes the store offline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage_traits::*;

/// In-memory build store backed by a `HashMap<scope, document>`.
#[derive(Debug, Default)]
pub struct MemoryBuildStore {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    quota_bytes: Option<u64>,
    offline: AtomicBool,
}

impl MemoryBuildStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every scope's document at `bytes`. Larger writes fail with
    /// `StorageError::QuotaExceeded` and leave the previous document intact.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Make every subsequent call fail with `StorageError::Unavailable`
    /// (or restore normal operation with `false`).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Raw document currently held for `scope`, bypassing the offline switch.
    pub fn raw_document(&self, scope: &StoreScope) -> Option<Vec<u8>> {
        self.documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(scope.as_str()).cloned())
    }

    /// Seed a scope with arbitrary bytes, e.g. a document written by an older
    /// client or a hand-edited export.
    pub fn insert_raw(&self, scope: &StoreScope, document: impl Into<Vec<u8>>) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(scope.as_str().to_string(), document.into());
        }
    }

    fn ensure_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }

    fn documents(&self) -> StorageResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.documents
            .lock()
            .map_err(|_| StorageError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BuildStore for MemoryBuildStore {
    async fn read(&self, scope: &StoreScope) -> StorageResult<Option<Vec<u8>>> {
        self.ensure_online()?;
        let docs = self.documents()?;
        Ok(docs.get(scope.as_str()).cloned())
    }

    async fn write(&self, scope: &StoreScope, document: &[u8]) -> StorageResult<()> {
        self.ensure_online()?;
        if let Some(limit) = self.quota_bytes {
            let attempted = document.len() as u64;
            if attempted > limit {
                return Err(StorageError::QuotaExceeded {
                    scope: scope.to_string(),
                    limit,
                    attempted,
                });
            }
        }
        let mut docs = self.documents()?;
        docs.insert(scope.as_str().to_string(), document.to_vec());
        Ok(())
    }

    async fn remove(&self, scope: &StoreScope) -> StorageResult<()> {
        self.ensure_online()?;
        let mut docs = self.documents()?;
        docs.remove(scope.as_str());
        Ok(())
    }
}
