//! Domain models for Rigforge.
//!
//! Canonical definitions for the core entities:
//! - `Slot`: The seven fixed component categories
//! - `Component`: Catalog item with slot-specific `meta` attributes
//! - `BuildConfig`: One component-or-nothing per slot
//! - `SavedBuild`: Named, persisted build snapshot

pub mod component;
pub mod config;
pub mod error;
pub mod saved_build;
pub mod slot;

pub use component::{Component, MetaValue};
pub use config::BuildConfig;
pub use error::{ConfiguratorError, Result};
pub use saved_build::{BuildId, SavedBuild};
pub use slot::Slot;
