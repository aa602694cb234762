//! Weighted aggregation and ranking.
//!
//! contribution(metric) = normalized value × weight / 100
//! total                = round(Σ contributions)
//!
//! `aggregate_scores` keeps input order. Ordering is a separate step
//! (`rank_breakdowns`) with a fixed tie-break: total desc, requirements
//! coverage desc, then submission order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricName;
use crate::normalize::NormalizedMetrics;
use crate::signals::SupplierIdentity;
use crate::weights::MetricWeights;

/// Explainable score for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonBreakdown {
    #[serde(flatten)]
    pub supplier: SupplierIdentity,
    pub metrics: NormalizedMetrics,
    /// Weighted contribution per metric (unrounded).
    pub contributions: BTreeMap<MetricName, f64>,
    pub total_score: i64,
}

/// A breakdown with its 1-based position in the cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedBreakdown {
    pub rank: usize,
    /// Index of the supplier in the submitted cohort.
    pub submission_index: usize,
    #[serde(flatten)]
    pub breakdown: ComparisonBreakdown,
}

pub fn aggregate_scores(
    normalized: &[NormalizedMetrics],
    weights: &MetricWeights,
) -> Vec<ComparisonBreakdown> {
    normalized
        .iter()
        .map(|m| {
            let contributions: BTreeMap<MetricName, f64> = MetricName::ALL
                .into_iter()
                .map(|metric| (metric, m.get(metric) * weights.get(metric) / 100.0))
                .collect();
            let raw: f64 = contributions.values().sum();
            let total_score = if raw.is_finite() {
                raw.round().max(0.0) as i64
            } else {
                0
            };
            ComparisonBreakdown {
                supplier: m.supplier.clone(),
                metrics: m.clone(),
                contributions,
                total_score,
            }
        })
        .collect()
}

/// Order breakdowns best-first. Deterministic for equal totals.
pub fn rank_breakdowns(breakdowns: Vec<ComparisonBreakdown>) -> Vec<RankedBreakdown> {
    let mut indexed: Vec<(usize, ComparisonBreakdown)> =
        breakdowns.into_iter().enumerate().collect();

    indexed.sort_by(|(ia, a), (ib, b)| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| {
                b.metrics
                    .requirements_coverage
                    .partial_cmp(&a.metrics.requirements_coverage)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| ia.cmp(ib))
    });

    indexed
        .into_iter()
        .enumerate()
        .map(|(pos, (submission_index, breakdown))| RankedBreakdown {
            rank: pos + 1,
            submission_index,
            breakdown,
        })
        .collect()
}
