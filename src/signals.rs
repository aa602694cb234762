//! signals.rs — Typed view of the per-response extracted signals.
//!
//! Upstream extraction produces loosely structured JSON; here every signal kind
//! gets its own optional sub-record so that "field missing" always means
//! "neutral default" and never an error. Wire names are camelCase.

use serde::{Deserialize, Serialize};

/// Who a response belongs to. Carried through every result unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierIdentity {
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl SupplierIdentity {
    pub fn new(supplier_id: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            supplier_name: supplier_name.into(),
            response_id: None,
        }
    }
}

/// Severity used by risks and hidden-fee alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// HIGH and CRITICAL are treated alike by the readiness rules.
    pub fn is_high_or_worse(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

/// Business impact of a mandatory requirement that is not (fully) met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    pub fn is_high_or_worse(self) -> bool {
        matches!(self, Impact::High | Impact::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    Meets,
    Partial,
    DoesNotMeet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementMatch {
    pub requirement: String,
    pub status: CoverageStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsCoverage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<f64>,
    /// Per-requirement matches. `None` means the extractor produced no item list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<RequirementMatch>>,
}

impl RequirementsCoverage {
    pub fn count(&self, status: CoverageStatus) -> usize {
        self.requirements
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|r| r.status == status)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenFee {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSignals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub hidden_fees: Vec<HiddenFee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlag {
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DemoRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSummary {
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<DemoRating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFindings {
    /// 0–100 as reported by the compliance review.
    pub score: f64,
    #[serde(default)]
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryItem {
    pub requirement: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryStatus {
    #[serde(default)]
    pub unmet: Vec<MandatoryItem>,
    #[serde(default)]
    pub partial: Vec<MandatoryItem>,
}

/// Everything the extractor knows about one supplier response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSignals {
    #[serde(flatten)]
    pub supplier: SupplierIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_coverage: Option<RequirementsCoverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSignals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_claims: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differentiators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<RiskFlag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<DemoSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceFindings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory_requirements: Option<MandatoryStatus>,
}

impl ExtractedSignals {
    /// Empty signals for a supplier; every rule falls back to its neutral default.
    pub fn for_supplier(supplier_id: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        Self {
            supplier: SupplierIdentity::new(supplier_id, supplier_name),
            ..Default::default()
        }
    }
}

/// Finite values only; NaN and infinities are treated as "not reported".
pub(crate) fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
