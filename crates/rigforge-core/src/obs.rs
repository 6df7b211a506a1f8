//! Structured observability hooks for build lifecycle events.
//!
//! This module provides:
//! - Scope-tagged tracing spans via `ScopeSpan` RAII guard
//! - Emission functions for evaluation, save/delete, finalize and storage failures
//!
//! Events are emitted at `info!` level unless noted (filter with `RIGFORGE_LOG`).

use tracing::{debug, info, warn};

use crate::gate::FinalizeBlock;

/// RAII guard that enters a span tagged with the store scope.
///
/// # Example
///
/// ```ignore
/// let _span = ScopeSpan::enter("acme-store");
/// // repository events are now associated with scope = "acme-store"
/// ```
pub struct ScopeSpan {
    _span: tracing::span::EnteredSpan,
}

impl ScopeSpan {
    /// Create and enter a span tagged with the scope.
    pub fn enter(scope: &str) -> Self {
        let span = tracing::info_span!("rigforge.scope", scope = %scope);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a build snapshot was re-evaluated (debug level, fires on every selection).
pub fn emit_build_evaluated(errors: usize, warnings: usize, total_price: f64) {
    debug!(
        event = "build.evaluated",
        errors = errors,
        warnings = warnings,
        total_price = total_price,
    );
}

/// Emit event: a build was persisted.
pub fn emit_build_saved(scope: &str, build_id: &str, total_price: f64) {
    info!(event = "build.saved", scope = %scope, build_id = %build_id, total_price = total_price);
}

/// Emit event: a saved build was removed.
pub fn emit_build_deleted(scope: &str, build_id: &str) {
    info!(event = "build.deleted", scope = %scope, build_id = %build_id);
}

/// Emit event: finalize refused.
pub fn emit_finalize_blocked(block: &FinalizeBlock) {
    let count = match block {
        FinalizeBlock::MissingRequired { missing_slots } => missing_slots.len(),
        FinalizeBlock::Errors { issues } => issues.len(),
    };
    info!(event = "build.finalize_blocked", reason = block.reason(), count = count);
}

/// Emit event: build handed to checkout.
pub fn emit_build_finalized(components: usize, total_price: f64) {
    info!(event = "build.finalized", components = components, total_price = total_price);
}

/// Emit event: persisting the build list failed (warning level).
pub fn emit_storage_write_failed(scope: &str, operation: &str, error: &dyn std::fmt::Display) {
    warn!(event = "storage.write_failed", scope = %scope, operation = %operation, error = %error);
}

/// Emit event: a stored entry failed schema validation and was skipped (warning level).
pub fn emit_corrupt_record_skipped(scope: &str, build_id: Option<&str>, reason: &str) {
    warn!(
        event = "build.corrupt_record",
        scope = %scope,
        build_id = build_id.unwrap_or("<none>"),
        reason = %reason,
    );
}
