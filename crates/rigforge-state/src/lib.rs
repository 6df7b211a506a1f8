//! Rigforge-State: Saved-Build Storage Backends
//!
//! This crate provides the persistence layer for the Rigforge build
//! configurator. It moves opaque per-scope documents in and out of a backend;
//! the shape of the saved-build list is owned by `rigforge-core`.
//!
//! ## Layer 0 - Data/Persistence
//!
//! Focus: atomic whole-document writes and scope isolation.
//!
//! ## Key Components
//!
//! - `BuildStore`: async storage contract
//! - `StoreScope`: validated storefront identifier
//! - `MemoryBuildStore`: in-memory backend with quota/offline failure modes
//! - `FsBuildStore`: one JSON file per scope, written atomically

mod error;
pub mod fakes;
pub mod fs;
pub mod storage_traits;

pub use error::StorageError;
pub use fakes::MemoryBuildStore;
pub use fs::FsBuildStore;
pub use storage_traits::{BuildStore, StorageResult, StoreScope, MAX_SCOPE_LEN};
