//! Error types for rigforge-state

use thiserror::Error;

/// Errors raised by a build store backend.
///
/// These surface to callers unmodified; the repository layer never retries
/// or swallows them.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Scope identifier rejected before touching the backend
    #[error("invalid store scope '{scope}': {reason}")]
    InvalidScope { scope: String, reason: String },

    /// Backend cannot be reached (offline, locked, runtime failure)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the backend's capacity
    #[error("storage quota exceeded for scope '{scope}': limit {limit}, attempted {attempted}")]
    QuotaExceeded {
        scope: String,
        limit: u64,
        attempted: u64,
    },

    /// Filesystem error
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_mentions_limit_and_attempt() {
        let err = StorageError::QuotaExceeded {
            scope: "acme-store".to_string(),
            limit: 5,
            attempted: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("acme-store"));
        assert!(msg.contains("limit 5"));
        assert!(msg.contains("attempted 9"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
