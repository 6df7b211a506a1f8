//! Derived build metrics: total price and a coarse performance score.
//!
//! The performance score is a price-as-performance proxy, not a benchmark.
//! CPU and GPU each earn one point per [`CPU_PRICE_PER_POINT`] /
//! [`GPU_PRICE_PER_POINT`] of price, capped at [`MAX_PART_SCORE`], and the
//! build score is the rounded mean of the two.

use serde::{Deserialize, Serialize};

use crate::domain::{BuildConfig, Slot};

pub const CPU_PRICE_PER_POINT: f64 = 1000.0;
pub const GPU_PRICE_PER_POINT: f64 = 2000.0;
pub const MAX_PART_SCORE: f64 = 100.0;

/// Totals derived from a build snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetrics {
    pub total_price: f64,
    /// 0..=100
    pub performance_score: u32,
}

/// Compute metrics over every slot of `config`. Pure and deterministic.
pub fn compute_metrics(config: &BuildConfig) -> BuildMetrics {
    let total_price = config.components().map(|c| c.price).sum();

    let price_of = |slot| config.get(slot).map_or(0.0, |c| c.price);
    let cpu_score = (price_of(Slot::Cpu) / CPU_PRICE_PER_POINT).min(MAX_PART_SCORE);
    let gpu_score = (price_of(Slot::Gpu) / GPU_PRICE_PER_POINT).min(MAX_PART_SCORE);
    let performance_score = ((cpu_score + gpu_score) / 2.0).round().max(0.0) as u32;

    BuildMetrics {
        total_price,
        performance_score,
    }
}
