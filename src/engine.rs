//! # Comparison Engine
//! Pure pipeline that maps a cohort of `ExtractedSignals` → ranked, explainable scores.
//! No I/O, suitable for unit tests and offline evaluation.
//!
//! Order:
//! 1) base metrics per supplier
//! 2) cohort-relative pricing
//! 3) weights from defaults + buyer overrides
//! 4) weighted totals, then ranking

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{aggregate_scores, rank_breakdowns, RankedBreakdown};
use crate::metrics::compute_base_metrics;
use crate::normalize::normalize_across_cohort;
use crate::signals::ExtractedSignals;
use crate::weights::{resolve_weights, MetricWeights, UnknownWeightId, WeightOverride};

/// Result of one comparison run. Fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortComparison {
    /// Weights actually applied.
    pub weights: MetricWeights,
    /// Override ids that matched no metric.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_weight_ids: Vec<UnknownWeightId>,
    /// Best first.
    pub rankings: Vec<RankedBreakdown>,
}

pub fn compare_cohort(
    cohort: &[ExtractedSignals],
    overrides: Option<&[WeightOverride]>,
    defaults: &MetricWeights,
) -> CohortComparison {
    let base: Vec<_> = cohort.iter().map(compute_base_metrics).collect();
    let normalized = normalize_across_cohort(&base);

    let resolution = resolve_weights(defaults, overrides);
    let unknown_weight_ids = resolution.unknown_ids().to_vec();
    let weights = resolution.into_weights();

    let rankings = rank_breakdowns(aggregate_scores(&normalized, &weights));

    debug!(
        cohort = cohort.len(),
        unknown_overrides = unknown_weight_ids.len(),
        leader = rankings
            .first()
            .map(|r| r.breakdown.supplier.supplier_id.as_str())
            .unwrap_or("-"),
        "cohort compared"
    );

    CohortComparison {
        weights,
        unknown_weight_ids,
        rankings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{PricingSignals, RequirementsCoverage};

    fn supplier(id: &str, coverage: f64, cost: Option<f64>) -> ExtractedSignals {
        let mut s = ExtractedSignals::for_supplier(id, id.to_uppercase());
        s.requirements_coverage = Some(RequirementsCoverage {
            coverage_percentage: Some(coverage),
            requirements: None,
        });
        s.pricing = Some(PricingSignals {
            total_cost: cost,
            ..Default::default()
        });
        s
    }

    #[test]
    fn empty_cohort_yields_empty_rankings() {
        let out = compare_cohort(&[], None, &MetricWeights::default());
        assert!(out.rankings.is_empty());
        assert!(out.unknown_weight_ids.is_empty());
    }

    #[test]
    fn cheaper_supplier_wins_on_equal_coverage() {
        let cohort = vec![
            supplier("dear", 70.0, Some(200_000.0)),
            supplier("cheap", 70.0, Some(120_000.0)),
        ];
        let out = compare_cohort(&cohort, None, &MetricWeights::default());
        assert_eq!(out.rankings[0].breakdown.supplier.supplier_id, "cheap");
        assert_eq!(out.rankings[0].breakdown.metrics.pricing_competitiveness, 100.0);
        assert_eq!(out.rankings[1].breakdown.metrics.pricing_competitiveness, 0.0);
        assert_eq!(out.rankings[1].submission_index, 0);
    }

    #[test]
    fn unknown_overrides_surface_in_result() {
        let o = vec![WeightOverride::new("support", 10.0)];
        let out = compare_cohort(
            &[supplier("a", 50.0, None)],
            Some(o.as_slice()),
            &MetricWeights::default(),
        );
        assert_eq!(out.unknown_weight_ids.len(), 1);
        assert_eq!(out.weights, MetricWeights::default());
    }
}
