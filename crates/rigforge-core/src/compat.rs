//! Component compatibility evaluator.
//!
//! Runs a [`CompatRuleSet`] over a [`BuildConfig`] and returns the resulting
//! [`CompatibilityIssue`] list. Evaluation is pure: no I/O, no logging, no
//! panics on missing attributes. A rule only fires when every slot it reads
//! is filled; absent `meta` keys fall back to neutral defaults.
//!
//! Issues are ordered by rule order, at most one issue per rule.

use serde::{Deserialize, Serialize};

use crate::domain::{BuildConfig, Component, MetaValue, Slot};

/// Fixed draw added for mainboard, fans and drives when budgeting the PSU.
pub const BASELINE_OVERHEAD_WATTS: f64 = 150.0;

/// PSU wattage below `draw * PSU_HEADROOM_FACTOR` earns a warning.
pub const PSU_HEADROOM_FACTOR: f64 = 1.2;

/// GPU clearance assumed when a case does not state `maxGpuLength`.
pub const DEFAULT_MAX_GPU_LENGTH_MM: f64 = 999.0;

/// A single compatibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatRule {
    /// CPU `socket` must equal motherboard `socket`.
    CpuSocket,
    /// RAM `type` must equal motherboard `ramType`.
    RamType,
    /// PSU `wattage` must cover CPU + GPU `tdp` plus baseline overhead.
    PsuBudget,
    /// Motherboard `formFactor` must be listed in case `formFactor`.
    CaseFormFactor,
    /// GPU `length` must not exceed case `maxGpuLength`.
    GpuClearance,
}

impl CompatRule {
    /// Slots this rule reads.
    pub fn slots(self) -> &'static [Slot] {
        match self {
            CompatRule::CpuSocket => &[Slot::Cpu, Slot::Motherboard],
            CompatRule::RamType => &[Slot::Ram, Slot::Motherboard],
            CompatRule::PsuBudget => &[Slot::Psu, Slot::Cpu, Slot::Gpu],
            CompatRule::CaseFormFactor => &[Slot::Case, Slot::Motherboard],
            CompatRule::GpuClearance => &[Slot::Gpu, Slot::Case],
        }
    }
}

/// An ordered set of rules to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatRuleSet {
    pub rules: Vec<CompatRule>,
}

impl CompatRuleSet {
    /// Every rule, in the order issues are reported.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                CompatRule::CpuSocket,
                CompatRule::RamType,
                CompatRule::PsuBudget,
                CompatRule::CaseFormFactor,
                CompatRule::GpuClearance,
            ],
        }
    }

    /// Add a rule to this set (builder pattern).
    pub fn with_rule(mut self, rule: CompatRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl Default for CompatRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whether an issue blocks checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One incompatibility between selected components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    #[serde(rename = "type")]
    pub severity: IssueSeverity,
    /// Which rule produced the issue.
    pub rule: CompatRule,
    /// Human-readable explanation.
    pub message: String,
    /// Slots involved, primary slot first.
    pub slots: Vec<Slot>,
}

impl CompatibilityIssue {
    fn error(rule: CompatRule, message: String, slots: Vec<Slot>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            rule,
            message,
            slots,
        }
    }

    fn warning(rule: CompatRule, message: String, slots: Vec<Slot>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            rule,
            message,
            slots,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

/// Evaluate a build against the standard rule set.
pub fn evaluate(config: &BuildConfig) -> Vec<CompatibilityIssue> {
    evaluate_with(&CompatRuleSet::standard(), config)
}

/// Evaluate a build against `rule_set`, returning issues in rule order.
pub fn evaluate_with(rule_set: &CompatRuleSet, config: &BuildConfig) -> Vec<CompatibilityIssue> {
    rule_set
        .rules
        .iter()
        .filter_map(|rule| check_rule(*rule, config))
        .collect()
}

/// Estimated system draw in watts: CPU and GPU `tdp` (0 when absent) plus
/// [`BASELINE_OVERHEAD_WATTS`].
pub fn estimated_draw_watts(config: &BuildConfig) -> f64 {
    let tdp = |slot| {
        config
            .get(slot)
            .and_then(|c: &Component| c.number("tdp"))
            .unwrap_or(0.0)
    };
    tdp(Slot::Cpu) + tdp(Slot::Gpu) + BASELINE_OVERHEAD_WATTS
}

fn describe(value: Option<&MetaValue>) -> String {
    value.map_or_else(|| "unspecified".to_string(), ToString::to_string)
}

fn check_rule(rule: CompatRule, config: &BuildConfig) -> Option<CompatibilityIssue> {
    match rule {
        CompatRule::CpuSocket => {
            let cpu = config.get(Slot::Cpu)?;
            let board = config.get(Slot::Motherboard)?;
            let (cpu_socket, board_socket) = (cpu.meta("socket"), board.meta("socket"));
            if cpu_socket != board_socket {
                Some(CompatibilityIssue::error(
                    rule,
                    format!(
                        "CPU socket {} does not match motherboard socket {}",
                        describe(cpu_socket),
                        describe(board_socket),
                    ),
                    vec![Slot::Cpu, Slot::Motherboard],
                ))
            } else {
                None
            }
        }
        CompatRule::RamType => {
            let ram = config.get(Slot::Ram)?;
            let board = config.get(Slot::Motherboard)?;
            let (ram_type, board_type) = (ram.meta("type"), board.meta("ramType"));
            if ram_type != board_type {
                Some(CompatibilityIssue::error(
                    rule,
                    format!(
                        "RAM type {} is not supported by the motherboard ({})",
                        describe(ram_type),
                        describe(board_type),
                    ),
                    vec![Slot::Ram, Slot::Motherboard],
                ))
            } else {
                None
            }
        }
        CompatRule::PsuBudget => {
            let psu = config.get(Slot::Psu)?;
            let consumers: Vec<Slot> = [Slot::Cpu, Slot::Gpu]
                .into_iter()
                .filter(|slot| config.is_filled(*slot))
                .collect();
            if consumers.is_empty() {
                return None;
            }
            // No stated wattage: nothing to compare against.
            let wattage = psu.number("wattage")?;
            let draw = estimated_draw_watts(config);
            let recommended = draw * PSU_HEADROOM_FACTOR;

            let mut slots = vec![Slot::Psu];
            slots.extend(consumers);

            if wattage < draw {
                Some(CompatibilityIssue::error(
                    rule,
                    format!(
                        "Power supply {wattage}W is below the estimated draw of {draw}W"
                    ),
                    slots,
                ))
            } else if wattage < recommended {
                Some(CompatibilityIssue::warning(
                    rule,
                    format!(
                        "Power supply {wattage}W leaves less than 20% headroom over the estimated draw of {draw}W (recommended {recommended:.0}W)"
                    ),
                    slots,
                ))
            } else {
                None
            }
        }
        CompatRule::CaseFormFactor => {
            let case = config.get(Slot::Case)?;
            let board = config.get(Slot::Motherboard)?;
            let board_ff = board.meta("formFactor").filter(|v| v.is_truthy())?;
            let supported = case.list("formFactor");
            // Strict string membership: numbers and lists never fit.
            let fits = match board_ff {
                MetaValue::Text(text) => supported.iter().any(|s| s == text),
                MetaValue::Number(_) | MetaValue::List(_) => false,
            };
            if !fits {
                let listed = if supported.is_empty() {
                    "none listed".to_string()
                } else {
                    supported.join(", ")
                };
                Some(CompatibilityIssue::error(
                    rule,
                    format!(
                        "Motherboard form factor {board_ff} does not fit the case (supports {listed})"
                    ),
                    vec![Slot::Case, Slot::Motherboard],
                ))
            } else {
                None
            }
        }
        CompatRule::GpuClearance => {
            let gpu = config.get(Slot::Gpu)?;
            let case = config.get(Slot::Case)?;
            let length = gpu.number("length")?;
            let max_length = case
                .number("maxGpuLength")
                .unwrap_or(DEFAULT_MAX_GPU_LENGTH_MM);
            if length > max_length {
                Some(CompatibilityIssue::error(
                    rule,
                    format!(
                        "GPU length {length}mm exceeds the case clearance of {max_length}mm"
                    ),
                    vec![Slot::Gpu, Slot::Case],
                ))
            } else {
                None
            }
        }
    }
}
