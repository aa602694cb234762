//! Cross-supplier normalization.
//!
//! Bounded metrics pass through unchanged; the headline cost becomes a
//! cohort-relative `pricing_competitiveness` in [0,100] (cheapest = 100,
//! most expensive = 0, linear in between).

use serde::{Deserialize, Serialize};

use crate::metrics::{clamp100, BaseMetrics, MetricName};
use crate::signals::{finite, SupplierIdentity};

/// Neutral pricing score for suppliers that did not report a cost.
pub const NEUTRAL_PRICING_SCORE: f64 = 50.0;

/// All seven metrics in [0,100], comparable across the cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetrics {
    #[serde(flatten)]
    pub supplier: SupplierIdentity,
    pub requirements_coverage: f64,
    pub pricing_competitiveness: f64,
    pub technical_strength: f64,
    pub differentiators: f64,
    pub risk_profile: f64,
    pub assumptions_quality: f64,
    pub demo_quality: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl NormalizedMetrics {
    pub fn get(&self, metric: MetricName) -> f64 {
        match metric {
            MetricName::RequirementsCoverage => self.requirements_coverage,
            MetricName::PricingCompetitiveness => self.pricing_competitiveness,
            MetricName::TechnicalStrength => self.technical_strength,
            MetricName::Differentiators => self.differentiators,
            MetricName::RiskProfile => self.risk_profile,
            MetricName::AssumptionsQuality => self.assumptions_quality,
            MetricName::DemoQuality => self.demo_quality,
        }
    }
}

/// Resolve pricing relative to the cohort. Output[i] corresponds to input[i].
pub fn normalize_across_cohort(metrics: &[BaseMetrics]) -> Vec<NormalizedMetrics> {
    // NaN and infinite costs count as unreported.
    let costs = metrics.iter().filter_map(|m| finite(m.total_cost));
    let bounds = costs.fold(None, |acc: Option<(f64, f64)>, c| match acc {
        None => Some((c, c)),
        Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
    });

    tracing::debug!(cohort = metrics.len(), ?bounds, "normalizing cohort pricing");

    metrics
        .iter()
        .map(|m| NormalizedMetrics {
            supplier: m.supplier.clone(),
            requirements_coverage: clamp100(m.requirements_coverage),
            pricing_competitiveness: pricing_score(finite(m.total_cost), bounds),
            technical_strength: clamp100(m.technical_strength),
            differentiators: clamp100(m.differentiators),
            risk_profile: clamp100(m.risk_profile),
            assumptions_quality: clamp100(m.assumptions_quality),
            demo_quality: clamp100(m.demo_quality),
            total_cost: finite(m.total_cost),
        })
        .collect()
}

fn pricing_score(cost: Option<f64>, bounds: Option<(f64, f64)>) -> f64 {
    match (cost, bounds) {
        (Some(cost), Some((min, max))) => {
            let span = max - min;
            if span <= 0.0 || !span.is_finite() {
                100.0
            } else {
                clamp100(100.0 - ((cost - min) / span) * 100.0)
            }
        }
        _ => NEUTRAL_PRICING_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(id: &str, cost: Option<f64>) -> BaseMetrics {
        BaseMetrics {
            supplier: SupplierIdentity::new(id, id),
            requirements_coverage: 60.0,
            technical_strength: 30.0,
            differentiators: 15.0,
            risk_profile: 90.0,
            assumptions_quality: 100.0,
            demo_quality: 50.0,
            total_cost: cost,
        }
    }

    #[test]
    fn empty_cohort_is_empty() {
        assert!(normalize_across_cohort(&[]).is_empty());
    }

    #[test]
    fn single_supplier_with_cost_scores_100() {
        let out = normalize_across_cohort(&[base("a", Some(5000.0))]);
        assert_eq!(out[0].pricing_competitiveness, 100.0);
    }

    #[test]
    fn no_costs_anywhere_is_neutral() {
        let out = normalize_across_cohort(&[base("a", None), base("b", None)]);
        assert!(out.iter().all(|m| m.pricing_competitiveness == 50.0));
    }

    #[test]
    fn identical_costs_all_score_100() {
        let out = normalize_across_cohort(&[base("a", Some(10.0)), base("b", Some(10.0))]);
        assert!(out.iter().all(|m| m.pricing_competitiveness == 100.0));
    }

    #[test]
    fn linear_inverse_min_max() {
        let out = normalize_across_cohort(&[
            base("mid", Some(150.0)),
            base("cheap", Some(100.0)),
            base("none", None),
            base("dear", Some(200.0)),
        ]);
        assert_eq!(out[0].supplier.supplier_id, "mid");
        assert!((out[0].pricing_competitiveness - 50.0).abs() < 1e-9);
        assert_eq!(out[1].pricing_competitiveness, 100.0);
        assert_eq!(out[2].pricing_competitiveness, 50.0);
        assert_eq!(out[3].pricing_competitiveness, 0.0);
        // non-pricing metrics pass through
        assert_eq!(out[3].risk_profile, 90.0);
    }

    #[test]
    fn non_finite_costs_are_treated_as_unreported() {
        let out = normalize_across_cohort(&[
            base("a", Some(100.0)),
            base("b", Some(f64::INFINITY)),
            base("c", Some(f64::NAN)),
            base("d", Some(200.0)),
        ]);
        let scores: Vec<f64> = out.iter().map(|m| m.pricing_competitiveness).collect();
        assert_eq!(scores, vec![100.0, 50.0, 50.0, 0.0]);
        assert_eq!(out[1].total_cost, None);
        assert_eq!(out[2].total_cost, None);

        let out = normalize_across_cohort(&[
            base("a", Some(100.0)),
            base("d", Some(200.0)),
            base("e", Some(f64::NAN)),
        ]);
        assert_eq!(out[2].pricing_competitiveness, 50.0);
    }
}
