// src/category/flags.rs
//! Compliance flags (absence checks) and missing-requirement suggestions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::answers::{answered, StructuredAnswers};
use super::{CategoryBreakdown, CategoryConfig, CategoryKind, FIELDS};

static DISASTER_RECOVERY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(disaster[\s-]*recovery|business[\s-]*continuity|failover|rto|rpo|backups?)\b")
        .expect("disaster recovery regex")
});

static SLA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\buptime\b|\bavailability\b|\bsla\b|\bservice[\s-]*level|\b99(?:\.\d+)?\s*%)")
        .expect("sla regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFlag {
    /// Stable machine-readable code, e.g. `missing_certification`.
    pub code: String,
    pub severity: FlagSeverity,
    pub message: String,
}

impl ComplianceFlag {
    fn new(code: &str, severity: FlagSeverity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementPriority {
    Critical,
    Important,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingRequirement {
    pub priority: RequirementPriority,
    pub category: CategoryKind,
    pub field: String,
    pub suggestion: String,
}

pub(crate) fn compliance_flags(
    answers: &StructuredAnswers,
    categories: &[CategoryBreakdown],
    config: &CategoryConfig,
) -> Vec<ComplianceFlag> {
    let corpus = answers.corpus();
    let mut flags = Vec::new();

    if !mentions_any(&corpus, &config.required_certifications) {
        flags.push(ComplianceFlag::new(
            "missing_certification",
            FlagSeverity::High,
            format!(
                "No required certification mentioned ({})",
                config.required_certifications.join(", ")
            ),
        ));
    }

    if !mentions_any(&corpus, &config.privacy_standards) {
        flags.push(ComplianceFlag::new(
            "missing_privacy_standard",
            FlagSeverity::High,
            format!(
                "No privacy standard mentioned ({})",
                config.privacy_standards.join(", ")
            ),
        ));
    }

    let sla = answers.sla.as_ref();
    if !sla.is_some_and(|s| answered(&s.disaster_recovery)) && !DISASTER_RECOVERY_RE.is_match(&corpus)
    {
        flags.push(ComplianceFlag::new(
            "missing_disaster_recovery",
            FlagSeverity::Medium,
            "No disaster recovery or business continuity plan mentioned",
        ));
    }

    if !sla.is_some_and(|s| answered(&s.uptime_commitment)) && !SLA_RE.is_match(&corpus) {
        flags.push(ComplianceFlag::new(
            "missing_sla",
            FlagSeverity::Medium,
            "No SLA or uptime commitment mentioned",
        ));
    }

    let pricing_incomplete = categories
        .iter()
        .find(|c| c.category == CategoryKind::Pricing)
        .is_some_and(|c| c.completed_items < c.total_items);
    if pricing_incomplete {
        flags.push(ComplianceFlag::new(
            "incomplete_pricing",
            FlagSeverity::Low,
            "Pricing model is incomplete",
        ));
    }

    flags
}

/// One suggestion per unanswered field, in category order.
pub(crate) fn missing_requirements(answers: &StructuredAnswers) -> Vec<MissingRequirement> {
    FIELDS
        .iter()
        .filter(|f| !(f.present)(answers))
        .map(|f| MissingRequirement {
            priority: f.priority,
            category: f.category,
            field: f.key.to_string(),
            suggestion: f.remediation.to_string(),
        })
        .collect()
}

/// True when any of `names` is mentioned in `text`.
/// An empty list of names is trivially satisfied.
fn mentions_any(text: &str, names: &[String]) -> bool {
    if names.is_empty() {
        return true;
    }
    names
        .iter()
        .filter_map(|n| mention_regex(n))
        .any(|re| re.is_match(text))
}

/// "ISO 27001" matches "iso27001", "ISO/IEC 27001:2022", "iso-27001".
/// Tokens may be separated by punctuation and at most one extra word.
fn mention_regex(name: &str) -> Option<Regex> {
    let tokens: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();
    if tokens.is_empty() {
        return None;
    }
    let pattern = format!(r"(?i)\b{}\b", tokens.join(r"[\W_]*(?:[A-Za-z]+[\W_]+)?"));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(%name, error = %e, "skipping unmatchable mention pattern");
            None
        }
    }
}
