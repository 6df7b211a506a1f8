//! Error taxonomy for the configurator engine.
//!
//! Compatibility problems are not errors: they are returned as
//! `CompatibilityIssue` data by the evaluator. This enum covers the hard
//! failures only.

use rigforge_state::StorageError;

use super::saved_build::BuildId;
use super::slot::Slot;
use crate::gate::FinalizeBlock;

/// Rigforge engine errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfiguratorError {
    #[error("component '{component_id}' is a '{sub_category}' part and cannot occupy the {slot} slot")]
    SlotMismatch {
        slot: Slot,
        sub_category: String,
        component_id: String,
    },

    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    #[error("saved build not found: {0}")]
    BuildNotFound(BuildId),

    #[error("saved build {id} is corrupt: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("saved build list for scope '{scope}' is corrupt: {reason}")]
    CorruptDocument { scope: String, reason: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("component not found in catalog: {0}")]
    ComponentNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("build cannot be finalized: {0}")]
    NotFinalizable(FinalizeBlock),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Rigforge engine operations.
pub type Result<T> = std::result::Result<T, ConfiguratorError>;
