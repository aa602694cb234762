// src/category/mod.rs
//! Category readiness: completeness of a supplier's structured answers.
//!
//! Independent of the extracted-signal classifier in `readiness`. Six fixed
//! categories, each with a fixed number of items; answered fields add points.
//! Five categories roll up into a weighted overall score, pricing is reported
//! but carries weight 0 by default.
//!
//! Compliance flags and missing-requirement suggestions are derived from the
//! same answers (see `flags`).

pub mod answers;
pub mod flags;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use answers::StructuredAnswers;
pub use flags::{ComplianceFlag, FlagSeverity, MissingRequirement, RequirementPriority};

use answers::{answered, answered_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Functional,
    Technical,
    Integration,
    Compliance,
    Sla,
    Pricing,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 6] = [
        CategoryKind::Functional,
        CategoryKind::Technical,
        CategoryKind::Integration,
        CategoryKind::Compliance,
        CategoryKind::Sla,
        CategoryKind::Pricing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::Functional => "Functional",
            CategoryKind::Technical => "Technical",
            CategoryKind::Integration => "Integration",
            CategoryKind::Compliance => "Compliance",
            CategoryKind::Sla => "SLA",
            CategoryKind::Pricing => "Pricing",
        }
    }
}

/// Roll-up weights. A weight of 0 keeps the category out of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub functional: f64,
    pub technical: f64,
    pub integration: f64,
    pub compliance: f64,
    pub sla: f64,
    pub pricing: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            functional: 0.25,
            technical: 0.25,
            integration: 0.10,
            compliance: 0.30,
            sla: 0.10,
            pricing: 0.0,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, kind: CategoryKind) -> f64 {
        let w = match kind {
            CategoryKind::Functional => self.functional,
            CategoryKind::Technical => self.technical,
            CategoryKind::Integration => self.integration,
            CategoryKind::Compliance => self.compliance,
            CategoryKind::Sla => self.sla,
            CategoryKind::Pricing => self.pricing,
        };
        if w.is_finite() {
            w.max(0.0)
        } else {
            0.0
        }
    }
}

/// Tunables for the category calculator; loaded as `[category]` in engine.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryConfig {
    pub weights: CategoryWeights,
    /// At least one of these must be mentioned, else a high-severity flag.
    pub required_certifications: Vec<String>,
    /// At least one of these must be mentioned, else a high-severity flag.
    pub privacy_standards: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            required_certifications: vec!["ISO 27001".to_string(), "SOC 2".to_string()],
            privacy_standards: vec!["GDPR".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: CategoryKind,
    pub label: String,
    pub completed_items: u32,
    pub total_items: u32,
    pub percentage: f64,
    pub score: u8,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReadiness {
    pub overall_score: u8,
    pub categories: Vec<CategoryBreakdown>,
    pub compliance_flags: Vec<ComplianceFlag>,
    pub missing_requirements: Vec<MissingRequirement>,
}

impl CategoryReadiness {
    pub fn category(&self, kind: CategoryKind) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| c.category == kind)
    }
}

/// One answer field: what it is worth and how to ask for it when missing.
pub(crate) struct FieldSpec {
    pub category: CategoryKind,
    pub key: &'static str,
    pub points: u32,
    pub priority: RequirementPriority,
    pub remediation: &'static str,
    pub present: fn(&StructuredAnswers) -> bool,
}

pub(crate) static FIELDS: Lazy<Vec<FieldSpec>> = Lazy::new(|| {
    use CategoryKind::*;
    use RequirementPriority::*;
    vec![
        // functional: 4
        FieldSpec {
            category: Functional,
            key: "coreCapabilities",
            points: 2,
            priority: Critical,
            remediation: "List the core capabilities the solution delivers against the requirements.",
            present: |a| a.functional.as_ref().is_some_and(|f| answered_list(&f.core_capabilities)),
        },
        FieldSpec {
            category: Functional,
            key: "useCases",
            points: 1,
            priority: Optional,
            remediation: "Describe representative use cases or reference deployments.",
            present: |a| a.functional.as_ref().is_some_and(|f| answered(&f.use_cases)),
        },
        FieldSpec {
            category: Functional,
            key: "customization",
            points: 1,
            priority: Optional,
            remediation: "Explain configuration and customization options.",
            present: |a| a.functional.as_ref().is_some_and(|f| answered(&f.customization)),
        },
        // technical: 5
        FieldSpec {
            category: Technical,
            key: "architecture",
            points: 1,
            priority: Important,
            remediation: "Provide an overview of the solution architecture.",
            present: |a| a.technical.as_ref().is_some_and(|t| answered(&t.architecture)),
        },
        FieldSpec {
            category: Technical,
            key: "hostingModel",
            points: 1,
            priority: Important,
            remediation: "State the hosting model (SaaS, private cloud, on-premise) and regions.",
            present: |a| a.technical.as_ref().is_some_and(|t| answered(&t.hosting_model)),
        },
        FieldSpec {
            category: Technical,
            key: "scalability",
            points: 1,
            priority: Optional,
            remediation: "Describe how the solution scales with users and data volume.",
            present: |a| a.technical.as_ref().is_some_and(|t| answered(&t.scalability)),
        },
        FieldSpec {
            category: Technical,
            key: "securityMeasures",
            points: 1,
            priority: Critical,
            remediation: "Document security controls: encryption, access control, vulnerability management.",
            present: |a| a.technical.as_ref().is_some_and(|t| answered(&t.security_measures)),
        },
        FieldSpec {
            category: Technical,
            key: "techStack",
            points: 1,
            priority: Optional,
            remediation: "List the main technologies and platforms used.",
            present: |a| a.technical.as_ref().is_some_and(|t| answered_list(&t.tech_stack)),
        },
        // integration: 3
        FieldSpec {
            category: Integration,
            key: "apis",
            points: 1,
            priority: Important,
            remediation: "Describe the available APIs and their authentication.",
            present: |a| a.integration.as_ref().is_some_and(|i| answered_list(&i.apis)),
        },
        FieldSpec {
            category: Integration,
            key: "supportedIntegrations",
            points: 1,
            priority: Optional,
            remediation: "List out-of-the-box integrations with third-party systems.",
            present: |a| {
                a.integration
                    .as_ref()
                    .is_some_and(|i| answered_list(&i.supported_integrations))
            },
        },
        FieldSpec {
            category: Integration,
            key: "dataMigration",
            points: 1,
            priority: Optional,
            remediation: "Outline the data migration approach and tooling.",
            present: |a| a.integration.as_ref().is_some_and(|i| answered(&i.data_migration)),
        },
        // compliance: 4
        FieldSpec {
            category: Compliance,
            key: "certifications",
            points: 2,
            priority: Critical,
            remediation: "List current security certifications (e.g. ISO 27001, SOC 2) with validity dates.",
            present: |a| a.compliance.as_ref().is_some_and(|c| answered_list(&c.certifications)),
        },
        FieldSpec {
            category: Compliance,
            key: "dataPrivacy",
            points: 1,
            priority: Critical,
            remediation: "Explain data privacy practices and applicable regulations (e.g. GDPR).",
            present: |a| a.compliance.as_ref().is_some_and(|c| answered(&c.data_privacy)),
        },
        FieldSpec {
            category: Compliance,
            key: "auditReports",
            points: 1,
            priority: Optional,
            remediation: "Offer recent third-party audit or penetration test reports.",
            present: |a| a.compliance.as_ref().is_some_and(|c| answered(&c.audit_reports)),
        },
        // sla: 4
        FieldSpec {
            category: Sla,
            key: "uptimeCommitment",
            points: 1,
            priority: Important,
            remediation: "Commit to an uptime percentage and the service credits that back it.",
            present: |a| a.sla.as_ref().is_some_and(|s| answered(&s.uptime_commitment)),
        },
        FieldSpec {
            category: Sla,
            key: "supportHours",
            points: 1,
            priority: Important,
            remediation: "State support hours, channels and time zones covered.",
            present: |a| a.sla.as_ref().is_some_and(|s| answered(&s.support_hours)),
        },
        FieldSpec {
            category: Sla,
            key: "responseTimes",
            points: 1,
            priority: Optional,
            remediation: "Give incident response and resolution times per severity.",
            present: |a| a.sla.as_ref().is_some_and(|s| answered(&s.response_times)),
        },
        FieldSpec {
            category: Sla,
            key: "disasterRecovery",
            points: 1,
            priority: Important,
            remediation: "Describe disaster recovery, backups and RTO/RPO targets.",
            present: |a| a.sla.as_ref().is_some_and(|s| answered(&s.disaster_recovery)),
        },
        // pricing: 3
        FieldSpec {
            category: Pricing,
            key: "pricingModel",
            points: 1,
            priority: Important,
            remediation: "Specify the pricing model (per user, per module, flat fee).",
            present: |a| a.pricing.as_ref().is_some_and(|p| answered(&p.pricing_model)),
        },
        FieldSpec {
            category: Pricing,
            key: "licenseCost",
            points: 1,
            priority: Optional,
            remediation: "Break down recurring license or subscription costs.",
            present: |a| a.pricing.as_ref().is_some_and(|p| answered(&p.license_cost)),
        },
        FieldSpec {
            category: Pricing,
            key: "implementationCost",
            points: 1,
            priority: Optional,
            remediation: "Quote one-off implementation and onboarding costs.",
            present: |a| a.pricing.as_ref().is_some_and(|p| answered(&p.implementation_cost)),
        },
    ]
});

/// Score answers with the default configuration.
pub fn calculate_category_readiness(answers: &StructuredAnswers) -> CategoryReadiness {
    calculate_category_readiness_with(answers, &CategoryConfig::default())
}

pub fn calculate_category_readiness_with(
    answers: &StructuredAnswers,
    config: &CategoryConfig,
) -> CategoryReadiness {
    let categories: Vec<CategoryBreakdown> = CategoryKind::ALL
        .into_iter()
        .map(|kind| breakdown(kind, answers, config.weights.get(kind)))
        .collect();

    let overall_score = overall(&categories);
    let compliance_flags = flags::compliance_flags(answers, &categories, config);
    let missing_requirements = flags::missing_requirements(answers);

    debug!(
        overall_score,
        flags = compliance_flags.len(),
        missing = missing_requirements.len(),
        "category readiness calculated"
    );

    CategoryReadiness {
        overall_score,
        categories,
        compliance_flags,
        missing_requirements,
    }
}

fn breakdown(kind: CategoryKind, answers: &StructuredAnswers, weight: f64) -> CategoryBreakdown {
    let (completed, total) = FIELDS
        .iter()
        .filter(|f| f.category == kind)
        .fold((0u32, 0u32), |(done, total), f| {
            let got = if (f.present)(answers) { f.points } else { 0 };
            (done + got, total + f.points)
        });
    let percentage = if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total) * 100.0
    };
    CategoryBreakdown {
        category: kind,
        label: kind.label().to_string(),
        completed_items: completed,
        total_items: total,
        percentage,
        score: to_score(percentage),
        weight,
    }
}

/// Weighted average of category scores; 0 when nothing carries weight.
fn overall(categories: &[CategoryBreakdown]) -> u8 {
    let total_weight: f64 = categories.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return 0;
    }
    let weighted: f64 = categories
        .iter()
        .map(|c| f64::from(c.score) * c.weight)
        .sum();
    to_score(weighted / total_weight)
}

fn to_score(pct: f64) -> u8 {
    if pct.is_finite() {
        pct.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}
