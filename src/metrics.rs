//! # Metric Computer
//! Maps one supplier's extracted signals to the bounded base metrics.
//! Pure; missing sub-records fall back to neutral values.
//!
//! Price is the only unbounded input, so it is carried as raw `total_cost`
//! here and resolved into `pricing_competitiveness` by the cohort normalizer.

use serde::{Deserialize, Serialize};

use crate::signals::{finite, ExtractedSignals, SupplierIdentity};

/// Per-claim credit for technical strength.
const TECHNICAL_CLAIM_POINTS: f64 = 10.0;
/// Per-item credit for differentiators.
const DIFFERENTIATOR_POINTS: f64 = 15.0;
/// Per-item penalty for risks and assumptions (inverse metrics).
const INVERSE_ITEM_PENALTY: f64 = 10.0;
/// Demo baseline; also the value when no demo took place.
const DEMO_BASELINE: f64 = 50.0;
const DEMO_ITEM_POINTS: f64 = 10.0;

/// The seven comparison dimensions, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    RequirementsCoverage,
    PricingCompetitiveness,
    TechnicalStrength,
    Differentiators,
    RiskProfile,
    AssumptionsQuality,
    DemoQuality,
}

impl MetricName {
    pub const ALL: [MetricName; 7] = [
        MetricName::RequirementsCoverage,
        MetricName::PricingCompetitiveness,
        MetricName::TechnicalStrength,
        MetricName::Differentiators,
        MetricName::RiskProfile,
        MetricName::AssumptionsQuality,
        MetricName::DemoQuality,
    ];

    /// Canonical wire id (camelCase), as used by evaluation matrices.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::RequirementsCoverage => "requirementsCoverage",
            MetricName::PricingCompetitiveness => "pricingCompetitiveness",
            MetricName::TechnicalStrength => "technicalStrength",
            MetricName::Differentiators => "differentiators",
            MetricName::RiskProfile => "riskProfile",
            MetricName::AssumptionsQuality => "assumptionsQuality",
            MetricName::DemoQuality => "demoQuality",
        }
    }

    /// Lenient lookup: camelCase, snake_case, any ASCII case.
    pub fn parse(id: &str) -> Option<MetricName> {
        let key = id.trim().replace(['_', '-', ' '], "").to_ascii_lowercase();
        MetricName::ALL
            .into_iter()
            .find(|m| m.as_str().to_ascii_lowercase() == key)
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounded metrics for one supplier before cohort normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMetrics {
    #[serde(flatten)]
    pub supplier: SupplierIdentity,
    pub requirements_coverage: f64,
    pub technical_strength: f64,
    pub differentiators: f64,
    pub risk_profile: f64,
    pub assumptions_quality: f64,
    pub demo_quality: f64,
    /// Raw headline cost; unresolved until the whole cohort is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

/// Compute the base metrics for one supplier response.
pub fn compute_base_metrics(signals: &ExtractedSignals) -> BaseMetrics {
    let requirements_coverage = signals
        .requirements_coverage
        .as_ref()
        .and_then(|c| finite(c.coverage_percentage))
        .map(clamp100)
        .unwrap_or(0.0);

    let technical_strength = capped(count(&signals.technical_claims), TECHNICAL_CLAIM_POINTS);
    let differentiators = capped(count(&signals.differentiators), DIFFERENTIATOR_POINTS);
    let risk_profile = inverse(
        signals.risks.as_ref().map_or(0, Vec::len),
        INVERSE_ITEM_PENALTY,
    );
    let assumptions_quality = inverse(count(&signals.assumptions), INVERSE_ITEM_PENALTY);

    let demo_quality = match &signals.demo {
        Some(demo) => clamp100(
            DEMO_BASELINE + DEMO_ITEM_POINTS * demo.capabilities.len() as f64
                - DEMO_ITEM_POINTS * demo.gaps.len() as f64,
        ),
        None => DEMO_BASELINE,
    };

    let total_cost = signals.pricing.as_ref().and_then(|p| finite(p.total_cost));

    tracing::debug!(
        supplier = %signals.supplier.supplier_id,
        requirements_coverage,
        technical_strength,
        differentiators,
        risk_profile,
        assumptions_quality,
        demo_quality,
        ?total_cost,
        "base metrics computed"
    );

    BaseMetrics {
        supplier: signals.supplier.clone(),
        requirements_coverage,
        technical_strength,
        differentiators,
        risk_profile,
        assumptions_quality,
        demo_quality,
        total_cost,
    }
}

fn count(items: &Option<Vec<String>>) -> usize {
    items.as_ref().map_or(0, Vec::len)
}

fn capped(n: usize, points: f64) -> f64 {
    (n as f64 * points).min(100.0)
}

fn inverse(n: usize, penalty: f64) -> f64 {
    (100.0 - n as f64 * penalty).max(0.0)
}

pub(crate) fn clamp100(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{DemoSummary, RequirementsCoverage, RiskFlag, Severity};

    fn risk(sev: Severity) -> RiskFlag {
        RiskFlag {
            description: "r".into(),
            severity: sev,
        }
    }

    #[test]
    fn worked_example_matches_expected_metrics() {
        let mut s = ExtractedSignals::for_supplier("s1", "Acme");
        s.requirements_coverage = Some(RequirementsCoverage {
            coverage_percentage: Some(80.0),
            requirements: None,
        });
        s.technical_claims = Some(vec!["a".into(), "b".into()]);
        s.differentiators = Some(vec!["d".into()]);
        s.risks = Some(vec![risk(Severity::Low), risk(Severity::High)]);
        s.assumptions = Some(vec!["x".into()]);
        s.demo = Some(DemoSummary {
            capabilities: vec!["c1".into(), "c2".into(), "c3".into()],
            gaps: vec!["g1".into()],
            overall_rating: None,
        });

        let m = compute_base_metrics(&s);
        assert_eq!(m.requirements_coverage, 80.0);
        assert_eq!(m.technical_strength, 20.0);
        assert_eq!(m.differentiators, 15.0);
        assert_eq!(m.risk_profile, 80.0);
        assert_eq!(m.assumptions_quality, 90.0);
        assert_eq!(m.demo_quality, 70.0);
        assert_eq!(m.total_cost, None);
    }

    #[test]
    fn absent_signals_use_neutral_defaults() {
        let m = compute_base_metrics(&ExtractedSignals::for_supplier("s", "S"));
        assert_eq!(m.requirements_coverage, 0.0);
        assert_eq!(m.technical_strength, 0.0);
        assert_eq!(m.differentiators, 0.0);
        assert_eq!(m.risk_profile, 100.0);
        assert_eq!(m.assumptions_quality, 100.0);
        assert_eq!(m.demo_quality, 50.0);
    }

    #[test]
    fn metrics_saturate_at_bounds() {
        let mut s = ExtractedSignals::for_supplier("s", "S");
        s.technical_claims = Some((0..25).map(|i| i.to_string()).collect());
        s.differentiators = Some((0..9).map(|i| i.to_string()).collect());
        s.risks = Some((0..14).map(|_| risk(Severity::Medium)).collect());
        s.demo = Some(DemoSummary {
            capabilities: vec![],
            gaps: (0..8).map(|i| i.to_string()).collect(),
            overall_rating: None,
        });
        s.requirements_coverage = Some(RequirementsCoverage {
            coverage_percentage: Some(140.0),
            requirements: None,
        });
        let m = compute_base_metrics(&s);
        assert_eq!(m.technical_strength, 100.0);
        assert_eq!(m.differentiators, 100.0);
        assert_eq!(m.risk_profile, 0.0);
        assert_eq!(m.demo_quality, 0.0);
        assert_eq!(m.requirements_coverage, 100.0);
    }

    #[test]
    fn metric_name_parse_is_lenient() {
        assert_eq!(MetricName::parse("riskProfile"), Some(MetricName::RiskProfile));
        assert_eq!(MetricName::parse("risk_profile"), Some(MetricName::RiskProfile));
        assert_eq!(MetricName::parse("DEMOQUALITY"), Some(MetricName::DemoQuality));
        assert_eq!(MetricName::parse("vendorViability"), None);
    }
}
