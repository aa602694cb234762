//! Metric weights and buyer overrides.
//!
//! TOML / JSON shape (camelCase, every key optional):
//! ```toml
//! [weights]
//! requirementsCoverage = 30
//! pricingCompetitiveness = 25
//! technicalStrength = 15
//! differentiators = 10
//! riskProfile = 10
//! assumptionsQuality = 5
//! demoQuality = 5
//! ```
//!
//! Overrides come from a buyer's evaluation matrix as `{id, weight}` pairs.
//! Ids that do not name a metric are reported back instead of being dropped
//! silently. Weights are never renormalized.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metrics::MetricName;

/// Below this Jaro-Winkler similarity we do not suggest a metric name.
const SUGGESTION_MIN_SIMILARITY: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricWeights {
    pub requirements_coverage: f64,
    pub pricing_competitiveness: f64,
    pub technical_strength: f64,
    pub differentiators: f64,
    pub risk_profile: f64,
    pub assumptions_quality: f64,
    pub demo_quality: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            requirements_coverage: 30.0,
            pricing_competitiveness: 25.0,
            technical_strength: 15.0,
            differentiators: 10.0,
            risk_profile: 10.0,
            assumptions_quality: 5.0,
            demo_quality: 5.0,
        }
    }
}

impl MetricWeights {
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

    pub fn set(&mut self, metric: MetricName, weight: f64) {
        let slot = match metric {
            MetricName::RequirementsCoverage => &mut self.requirements_coverage,
            MetricName::PricingCompetitiveness => &mut self.pricing_competitiveness,
            MetricName::TechnicalStrength => &mut self.technical_strength,
            MetricName::Differentiators => &mut self.differentiators,
            MetricName::RiskProfile => &mut self.risk_profile,
            MetricName::AssumptionsQuality => &mut self.assumptions_quality,
            MetricName::DemoQuality => &mut self.demo_quality,
        };
        *slot = sanitize_weight(weight);
    }

    pub fn sum(&self) -> f64 {
        MetricName::ALL.iter().map(|m| self.get(*m)).sum()
    }

    /// Same vector with every weight finite and non-negative.
    pub fn sanitized(mut self) -> Self {
        for m in MetricName::ALL {
            self.set(m, self.get(m));
        }
        self
    }
}

/// One entry of a buyer's evaluation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightOverride {
    pub id: String,
    pub weight: f64,
}

impl WeightOverride {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// An override id that matched no metric, with the closest metric if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownWeightId {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<MetricName>,
}

/// Outcome of applying overrides: either clean, or usable with warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightResolution {
    Resolved(MetricWeights),
    Warning {
        weights: MetricWeights,
        unknown: Vec<UnknownWeightId>,
    },
}

impl WeightResolution {
    pub fn weights(&self) -> &MetricWeights {
        match self {
            WeightResolution::Resolved(w) => w,
            WeightResolution::Warning { weights, .. } => weights,
        }
    }

    pub fn into_weights(self) -> MetricWeights {
        match self {
            WeightResolution::Resolved(w) => w,
            WeightResolution::Warning { weights, .. } => weights,
        }
    }

    pub fn unknown_ids(&self) -> &[UnknownWeightId] {
        match self {
            WeightResolution::Resolved(_) => &[],
            WeightResolution::Warning { unknown, .. } => unknown,
        }
    }
}

/// Start from `defaults`, overwrite every entry whose id names a metric.
pub fn resolve_weights(
    defaults: &MetricWeights,
    overrides: Option<&[WeightOverride]>,
) -> WeightResolution {
    let mut weights = defaults.sanitized();
    let mut unknown = Vec::new();

    for o in overrides.unwrap_or_default() {
        match MetricName::parse(&o.id) {
            Some(metric) => weights.set(metric, o.weight),
            None => {
                let suggestion = suggest_metric(&o.id);
                warn!(id = %o.id, ?suggestion, "ignoring weight override for unknown metric");
                unknown.push(UnknownWeightId {
                    id: o.id.clone(),
                    suggestion,
                });
            }
        }
    }

    if unknown.is_empty() {
        WeightResolution::Resolved(weights)
    } else {
        WeightResolution::Warning { weights, unknown }
    }
}

fn suggest_metric(id: &str) -> Option<MetricName> {
    let probe = id.trim().replace(['_', '-', ' '], "").to_ascii_lowercase();
    MetricName::ALL
        .into_iter()
        .map(|m| (m, strsim::jaro_winkler(&probe, &m.as_str().to_ascii_lowercase())))
        .filter(|(_, sim)| *sim >= SUGGESTION_MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(m, _)| m)
}

fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() {
        w.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sum_to_100() {
        assert!((MetricWeights::default().sum() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let d = MetricWeights::default();
        assert_eq!(resolve_weights(&d, Some(&[][..])), WeightResolution::Resolved(d));
        assert_eq!(resolve_weights(&d, None).into_weights(), d);
    }

    #[test]
    fn known_ids_overwrite_without_renormalizing() {
        let d = MetricWeights::default();
        let o = vec![
            WeightOverride::new("pricingCompetitiveness", 50.0),
            WeightOverride::new("demo_quality", 0.0),
        ];
        let r = resolve_weights(&d, Some(o.as_slice()));
        let w = r.weights();
        assert_eq!(w.pricing_competitiveness, 50.0);
        assert_eq!(w.demo_quality, 0.0);
        assert_eq!(w.requirements_coverage, 30.0);
        assert!((w.sum() - 120.0).abs() < 1e-9);
        assert!(r.unknown_ids().is_empty());
    }

    #[test]
    fn unknown_ids_are_reported_with_suggestion() {
        let d = MetricWeights::default();
        let o = vec![
            WeightOverride::new("riskProfil", 20.0),
            WeightOverride::new("vendorHeadcount", 5.0),
        ];
        let r = resolve_weights(&d, Some(o.as_slice()));
        match &r {
            WeightResolution::Warning { weights, unknown } => {
                assert_eq!(*weights, d);
                assert_eq!(unknown.len(), 2);
                assert_eq!(unknown[0].suggestion, Some(MetricName::RiskProfile));
                assert_eq!(unknown[1].id, "vendorHeadcount");
            }
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn negative_and_nan_overrides_clamp_to_zero() {
        let d = MetricWeights::default();
        let o = vec![
            WeightOverride::new("technicalStrength", -5.0),
            WeightOverride::new("differentiators", f64::NAN),
        ];
        let w = resolve_weights(&d, Some(o.as_slice())).into_weights();
        assert_eq!(w.technical_strength, 0.0);
        assert_eq!(w.differentiators, 0.0);
    }
}
