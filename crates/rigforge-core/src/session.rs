//! An editing session: the live build plus wizard position.
//!
//! Every mutation returns a fresh [`BuildSummary`] computed over the whole
//! snapshot (evaluate, then compute metrics). There is no incremental
//! recomputation; the checks are constant-time and catalogs are small.

use serde::Serialize;

use crate::compat::{evaluate, CompatibilityIssue, IssueSeverity};
use crate::domain::{BuildConfig, Component, Result, Slot};
use crate::gate::{can_finalize, finalize, CheckoutHandoff, FinalizeVerdict};
use crate::metrics::METRICS;
use crate::obs;
use crate::orchestration::StepOrchestrator;
use crate::scoring::{compute_metrics, BuildMetrics};
use crate::selection::{clear_slot, select_component};

/// Derived view of a build snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub issues: Vec<CompatibilityIssue>,
    pub metrics: BuildMetrics,
}

impl BuildSummary {
    /// Evaluate `config` and compute its metrics.
    pub fn of(config: &BuildConfig) -> Self {
        let summary = Self {
            issues: evaluate(config),
            metrics: compute_metrics(config),
        };
        METRICS.inc_evaluations();
        obs::emit_build_evaluated(
            summary.error_count(),
            summary.warning_count(),
            summary.metrics.total_price,
        );
        summary
    }

    pub fn error_count(&self) -> usize {
        self.count(IssueSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(IssueSeverity::Warning)
    }

    fn count(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Owns the build being edited. Snapshots handed out are copies.
#[derive(Debug, Clone, Default)]
pub struct BuildSession {
    config: BuildConfig,
    steps: StepOrchestrator,
}

impl BuildSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn steps(&self) -> &StepOrchestrator {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepOrchestrator {
        &mut self.steps
    }

    /// Place `component` in `slot` (or clear it with `None`).
    ///
    /// On `SlotMismatch` the session is unchanged.
    pub fn select(&mut self, slot: Slot, component: Option<Component>) -> Result<BuildSummary> {
        self.config = select_component(&self.config, slot, component)?;
        Ok(self.summary())
    }

    /// Place `component` in the wizard's active slot.
    pub fn select_current(&mut self, component: Component) -> Result<BuildSummary> {
        let slot = self.steps.current_slot();
        self.select(slot, Some(component))
    }

    pub fn clear(&mut self, slot: Slot) -> BuildSummary {
        self.config = clear_slot(&self.config, slot);
        self.summary()
    }

    /// Empty every slot and return to the first step.
    pub fn reset(&mut self) -> BuildSummary {
        self.config = BuildConfig::empty();
        self.steps = StepOrchestrator::new();
        self.summary()
    }

    /// Replace the live build, e.g. with a loaded saved build's config.
    pub fn restore(&mut self, config: BuildConfig) -> Result<BuildSummary> {
        config.check_taxonomy()?;
        self.config = config;
        Ok(self.summary())
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary::of(&self.config)
    }

    pub fn can_finalize(&self) -> FinalizeVerdict {
        can_finalize(&self.config)
    }

    pub fn finalize(&self) -> Result<CheckoutHandoff> {
        finalize(&self.config)
    }
}
