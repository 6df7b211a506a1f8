//! Storage trait definitions for Rigforge
//!
//! A `BuildStore` persists one opaque document per `StoreScope`. The document
//! is the serialized saved-build list for a single storefront; this layer
//! never interprets it, so any backend that can hold bytes under a key
//! (in-memory map, file, remote key-value API) can satisfy the contract.
//!
//! In-memory fakes are provided via the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Longest scope identifier accepted by any backend.
pub const MAX_SCOPE_LEN: usize = 128;

/// Opaque identifier selecting a storefront's build list (e.g. a store slug).
///
/// Restricted to `[A-Za-z0-9._-]`, non-empty, not starting with `.`, so every
/// backend can use it directly as a key or file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreScope(String);

impl StoreScope {
    /// Validate and wrap a scope identifier.
    pub fn new(scope: impl Into<String>) -> StorageResult<Self> {
        let scope = scope.into();
        let reason = if scope.is_empty() {
            Some("scope must not be empty")
        } else if scope.len() > MAX_SCOPE_LEN {
            Some("scope is longer than 128 characters")
        } else if scope.starts_with('.') {
            Some("scope must not start with '.'")
        } else if !scope
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            Some("scope may only contain ASCII letters, digits, '.', '_' and '-'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StorageError::InvalidScope {
                scope,
                reason: reason.to_string(),
            }),
            None => Ok(StoreScope(scope)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StoreScope {
    type Error = StorageError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        StoreScope::new(s)
    }
}

impl From<StoreScope> for String {
    fn from(scope: StoreScope) -> Self {
        scope.0
    }
}

impl std::fmt::Display for StoreScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent home for per-scope saved-build documents.
///
/// Guarantees:
/// - `read` after a successful `write` returns exactly the written bytes.
/// - `write` replaces the whole document atomically: on error the previous
///   document (or absence) is left untouched.
/// - Scopes are isolated from one another.
#[async_trait]
pub trait BuildStore: Send + Sync {
    /// Read the document for `scope`. Returns `Ok(None)` if nothing was ever written.
    async fn read(&self, scope: &StoreScope) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the document for `scope`.
    async fn write(&self, scope: &StoreScope, document: &[u8]) -> StorageResult<()>;

    /// Remove the document for `scope`. No-op if absent.
    async fn remove(&self, scope: &StoreScope) -> StorageResult<()>;
}
