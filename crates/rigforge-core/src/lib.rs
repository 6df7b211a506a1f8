//! Rigforge Core Library
//!
//! PC build configurator engine: slot-based component selection,
//! compatibility evaluation, derived metrics, the finalize gate, and
//! saved-build persistence over a pluggable store.
//!
//! The pipeline is explicit and synchronous: mutate with
//! [`select_component`], then [`evaluate`] and [`compute_metrics`] over the
//! whole snapshot. [`BuildSession`] packages that loop for interactive use.

pub mod catalog;
pub mod compat;
pub mod domain;
pub mod gate;
pub mod metrics;
pub mod obs;
pub mod orchestration;
pub mod repository;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod telemetry;

pub use catalog::Catalog;
pub use compat::{
    estimated_draw_watts, evaluate, evaluate_with, CompatRule, CompatRuleSet, CompatibilityIssue,
    IssueSeverity, BASELINE_OVERHEAD_WATTS, DEFAULT_MAX_GPU_LENGTH_MM, PSU_HEADROOM_FACTOR,
};
pub use domain::{
    BuildConfig, BuildId, Component, ConfiguratorError, MetaValue, Result, SavedBuild, Slot,
};
pub use gate::{can_finalize, finalize, CheckoutHandoff, FinalizeBlock, FinalizeVerdict};
pub use orchestration::StepOrchestrator;
pub use repository::{BuildRepository, RepositoryConfig, DEFAULT_SCOPE, UNTITLED_BUILD_NAME};
pub use scoring::{compute_metrics, BuildMetrics};
pub use selection::{clear_slot, select_component};
pub use session::{BuildSession, BuildSummary};

pub use metrics::{MetricsSnapshot, METRICS};
pub use obs::{
    emit_build_deleted, emit_build_evaluated, emit_build_finalized, emit_build_saved,
    emit_corrupt_record_skipped, emit_finalize_blocked, emit_storage_write_failed, ScopeSpan,
};
pub use telemetry::init_tracing;

pub use rigforge_state::{BuildStore, FsBuildStore, MemoryBuildStore, StorageError, StoreScope};

/// Rigforge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
