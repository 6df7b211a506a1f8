//! Finalize gate.
//!
//! Decides whether a [`BuildConfig`] may proceed to checkout. Missing
//! required slots are reported first; only when every required slot is
//! filled are compatibility errors considered. Warnings never block.
//! A blocked verdict lists every offending slot or issue, not just the first.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::compat::{evaluate, CompatibilityIssue};
use crate::domain::{BuildConfig, Component, ConfiguratorError, Result, Slot};
use crate::obs;
use crate::scoring::compute_metrics;

/// Why a build cannot go to checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum FinalizeBlock {
    /// One or more required slots are empty.
    MissingRequired {
        #[serde(rename = "missingSlots")]
        missing_slots: Vec<Slot>,
    },
    /// The build has at least one error-level compatibility issue.
    Errors { issues: Vec<CompatibilityIssue> },
}

impl FinalizeBlock {
    /// Short machine-readable reason (`missingRequired` / `errors`).
    pub fn reason(&self) -> &'static str {
        match self {
            FinalizeBlock::MissingRequired { .. } => "missingRequired",
            FinalizeBlock::Errors { .. } => "errors",
        }
    }
}

impl fmt::Display for FinalizeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalizeBlock::MissingRequired { missing_slots } => {
                let names: Vec<&str> = missing_slots.iter().map(|s| s.as_str()).collect();
                write!(f, "missing required components: {}", names.join(", "))
            }
            FinalizeBlock::Errors { issues } => {
                let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
                write!(
                    f,
                    "{} compatibility error(s): {}",
                    issues.len(),
                    messages.join("; ")
                )
            }
        }
    }
}

/// Outcome of [`can_finalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeVerdict {
    Ready,
    Blocked(FinalizeBlock),
}

impl FinalizeVerdict {
    /// Whether the build may proceed to checkout.
    pub fn ok(&self) -> bool {
        matches!(self, FinalizeVerdict::Ready)
    }

    pub fn block(&self) -> Option<&FinalizeBlock> {
        match self {
            FinalizeVerdict::Ready => None,
            FinalizeVerdict::Blocked(block) => Some(block),
        }
    }
}

/// Wire shape: `{ "ok": true }` or `{ "ok": false, "reason": ..., ... }`.
impl Serialize for FinalizeVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            ok: bool,
            #[serde(flatten)]
            block: Option<&'a FinalizeBlock>,
        }

        Wire {
            ok: self.ok(),
            block: self.block(),
        }
        .serialize(serializer)
    }
}

/// Evaluate whether `config` may proceed to checkout.
pub fn can_finalize(config: &BuildConfig) -> FinalizeVerdict {
    let missing_slots = config.missing(&Slot::REQUIRED);
    if !missing_slots.is_empty() {
        return FinalizeVerdict::Blocked(FinalizeBlock::MissingRequired { missing_slots });
    }

    let errors: Vec<CompatibilityIssue> = evaluate(config)
        .into_iter()
        .filter(CompatibilityIssue::is_error)
        .collect();
    if !errors.is_empty() {
        return FinalizeVerdict::Blocked(FinalizeBlock::Errors { issues: errors });
    }

    FinalizeVerdict::Ready
}

/// What checkout receives for a finalized build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    /// Selected components in slot order.
    pub components: Vec<Component>,
    pub total_price: f64,
}

/// Run the gate and, if it passes, flatten the build for checkout.
pub fn finalize(config: &BuildConfig) -> Result<CheckoutHandoff> {
    match can_finalize(config) {
        FinalizeVerdict::Ready => {
            let handoff = CheckoutHandoff {
                components: config.components().cloned().collect(),
                total_price: compute_metrics(config).total_price,
            };
            obs::emit_build_finalized(handoff.components.len(), handoff.total_price);
            Ok(handoff)
        }
        FinalizeVerdict::Blocked(block) => {
            obs::emit_finalize_blocked(&block);
            Err(ConfiguratorError::NotFinalizable(block))
        }
    }
}
