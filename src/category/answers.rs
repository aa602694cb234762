// src/category/answers.rs
//! Free-form structured answers a supplier gave to the buyer's questionnaire.
//! Only presence matters for completeness; text is scanned for mentions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionalAnswers {
    pub core_capabilities: Vec<String>,
    pub use_cases: Option<String>,
    pub customization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalAnswers {
    pub architecture: Option<String>,
    pub hosting_model: Option<String>,
    pub scalability: Option<String>,
    pub security_measures: Option<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationAnswers {
    pub apis: Vec<String>,
    pub supported_integrations: Vec<String>,
    pub data_migration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceAnswers {
    pub certifications: Vec<String>,
    pub data_privacy: Option<String>,
    pub audit_reports: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlaAnswers {
    pub uptime_commitment: Option<String>,
    pub support_hours: Option<String>,
    pub response_times: Option<String>,
    pub disaster_recovery: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingAnswers {
    pub pricing_model: Option<String>,
    pub license_cost: Option<String>,
    pub implementation_cost: Option<String>,
}

/// All sections are optional; a missing section counts as "nothing answered".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredAnswers {
    pub functional: Option<FunctionalAnswers>,
    pub technical: Option<TechnicalAnswers>,
    pub integration: Option<IntegrationAnswers>,
    pub compliance: Option<ComplianceAnswers>,
    pub sla: Option<SlaAnswers>,
    pub pricing: Option<PricingAnswers>,
}

impl StructuredAnswers {
    /// Every answered text fragment, for mention scanning.
    pub fn corpus(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(f) = &self.functional {
            parts.extend(f.core_capabilities.iter().map(String::as_str));
            parts.extend(f.use_cases.as_deref());
            parts.extend(f.customization.as_deref());
        }
        if let Some(t) = &self.technical {
            parts.extend(t.architecture.as_deref());
            parts.extend(t.hosting_model.as_deref());
            parts.extend(t.scalability.as_deref());
            parts.extend(t.security_measures.as_deref());
            parts.extend(t.tech_stack.iter().map(String::as_str));
        }
        if let Some(i) = &self.integration {
            parts.extend(i.apis.iter().map(String::as_str));
            parts.extend(i.supported_integrations.iter().map(String::as_str));
            parts.extend(i.data_migration.as_deref());
        }
        if let Some(c) = &self.compliance {
            parts.extend(c.certifications.iter().map(String::as_str));
            parts.extend(c.data_privacy.as_deref());
            parts.extend(c.audit_reports.as_deref());
        }
        if let Some(s) = &self.sla {
            parts.extend(s.uptime_commitment.as_deref());
            parts.extend(s.support_hours.as_deref());
            parts.extend(s.response_times.as_deref());
            parts.extend(s.disaster_recovery.as_deref());
        }
        if let Some(p) = &self.pricing {
            parts.extend(p.pricing_model.as_deref());
            parts.extend(p.license_cost.as_deref());
            parts.extend(p.implementation_cost.as_deref());
        }
        parts.join("\n")
    }
}

/// Answered = present and not just whitespace.
pub(crate) fn answered(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}

pub(crate) fn answered_list(v: &[String]) -> bool {
    v.iter().any(|s| !s.trim().is_empty())
}
