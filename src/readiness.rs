//! readiness.rs — Readiness verdict for a single supplier response.
//!
//! Ordered rule procedure over the extracted signals. Each rule either records
//! a critical issue, a conditional factor, a strength, or nothing, and may
//! deduct from a starting score of 100. Absent inputs skip their rule.
//!
//! Verdict policy:
//!   - ≥ 3 critical issues or score < 50          → NOT_READY
//!   - any critical, ≥ 2 conditional, score < 70  → CONDITIONAL
//!   - otherwise                                  → READY

use serde::{Deserialize, Serialize};

use crate::signals::{CoverageStatus, DemoRating, ExtractedSignals, Severity};

const START_SCORE: i32 = 100;

const MANDATORY_MANY_UNMET: usize = 3;
const MANDATORY_MANY_UNMET_PENALTY: i32 = 40;
const MANDATORY_HIGH_IMPACT_PENALTY: i32 = 35;
const MANDATORY_LOW_IMPACT_PENALTY: i32 = 15;
const MANDATORY_PARTIAL_PENALTY: i32 = 5;

const COMPLIANCE_CRITICAL_BELOW: f64 = 50.0;
const COMPLIANCE_CONDITIONAL_BELOW: f64 = 70.0;
const COMPLIANCE_STRONG_FROM: f64 = 85.0;
const COMPLIANCE_CRITICAL_PENALTY: i32 = 25;
const COMPLIANCE_CONDITIONAL_PENALTY: i32 = 10;

const RISK_MANY_HIGH: usize = 3;
const RISK_MANY_HIGH_PENALTY: i32 = 30;
const RISK_PER_HIGH_PENALTY: i32 = 12;
const RISK_MEDIUM_LIMIT: usize = 3;
const RISK_MEDIUM_PENALTY: i32 = 8;

const HIDDEN_FEE_PENALTY: i32 = 8;

const COVERAGE_UNMET_LIMIT: usize = 5;
const COVERAGE_GAP_PENALTY: i32 = 10;
const COVERAGE_STRENGTH_MAX_PARTIAL: usize = 2;

const NOT_READY_CRITICAL_COUNT: usize = 3;
const NOT_READY_BELOW: i32 = 50;
const CONDITIONAL_FACTOR_COUNT: usize = 2;
const CONDITIONAL_BELOW: i32 = 70;

/// How many items the rationale cites per list.
const RATIONALE_CITATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessIndicator {
    Ready,
    Conditional,
    NotReady,
}

impl std::fmt::Display for ReadinessIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => f.write_str("READY"),
            Self::Conditional => f.write_str("CONDITIONAL"),
            Self::NotReady => f.write_str("NOT_READY"),
        }
    }
}

/// Verdict with explainability lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessAnalysis {
    pub indicator: ReadinessIndicator,
    /// Always within 0..=100.
    pub score: u8,
    pub rationale: String,
    pub critical_issues: Vec<String>,
    pub conditional_factors: Vec<String>,
    pub strengths: Vec<String>,
}

/// Accumulates findings while the rules run.
#[derive(Debug)]
struct Assessment {
    score: i32,
    critical: Vec<String>,
    conditional: Vec<String>,
    strengths: Vec<String>,
}

impl Assessment {
    fn new() -> Self {
        Self {
            score: START_SCORE,
            critical: Vec::new(),
            conditional: Vec::new(),
            strengths: Vec::new(),
        }
    }

    fn critical(&mut self, msg: impl Into<String>, penalty: i32) {
        self.critical.push(msg.into());
        self.score = self.score.saturating_sub(penalty);
    }

    fn conditional(&mut self, msg: impl Into<String>, penalty: i32) {
        self.conditional.push(msg.into());
        self.score = self.score.saturating_sub(penalty);
    }

    fn strength(&mut self, msg: impl Into<String>) {
        self.strengths.push(msg.into());
    }
}

pub fn classify_readiness(signals: &ExtractedSignals) -> ReadinessAnalysis {
    let mut a = Assessment::new();

    mandatory_rule(signals, &mut a);
    compliance_rule(signals, &mut a);
    risk_rule(signals, &mut a);
    hidden_fee_rule(signals, &mut a);
    coverage_rule(signals, &mut a);
    demo_rule(signals, &mut a);

    let score = a.score.clamp(0, 100);
    let indicator = verdict(a.critical.len(), a.conditional.len(), score);
    let rationale = rationale(indicator, score, &a);

    tracing::debug!(
        supplier = %signals.supplier.supplier_id,
        %indicator,
        score,
        critical = a.critical.len(),
        conditional = a.conditional.len(),
        strengths = a.strengths.len(),
        "readiness classified"
    );

    ReadinessAnalysis {
        indicator,
        score: u8::try_from(score).unwrap_or(0),
        rationale,
        critical_issues: a.critical,
        conditional_factors: a.conditional,
        strengths: a.strengths,
    }
}

fn verdict(critical: usize, conditional: usize, score: i32) -> ReadinessIndicator {
    if critical >= NOT_READY_CRITICAL_COUNT || score < NOT_READY_BELOW {
        ReadinessIndicator::NotReady
    } else if critical > 0 || conditional >= CONDITIONAL_FACTOR_COUNT || score < CONDITIONAL_BELOW
    {
        ReadinessIndicator::Conditional
    } else {
        ReadinessIndicator::Ready
    }
}

// --- rules ---

fn mandatory_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    let Some(m) = &signals.mandatory_requirements else {
        return;
    };
    let unmet = m.unmet.len();

    if unmet >= MANDATORY_MANY_UNMET {
        // One entry per requirement: three or more unmet must-haves always block.
        for item in &m.unmet {
            a.critical
                .push(format!("Mandatory requirement not met: {}", item.requirement));
        }
        a.score = a.score.saturating_sub(MANDATORY_MANY_UNMET_PENALTY);
    } else if unmet > 0 {
        let names = join_requirements(m.unmet.iter().map(|i| i.requirement.as_str()));
        if m.unmet.iter().any(|i| i.impact.is_high_or_worse()) {
            a.critical(
                format!("{unmet} high-impact mandatory requirement(s) not met: {names}"),
                MANDATORY_HIGH_IMPACT_PENALTY,
            );
        } else {
            a.conditional(
                format!("{unmet} mandatory requirement(s) not met: {names}"),
                MANDATORY_LOW_IMPACT_PENALTY,
            );
        }
    }

    let partial = m.partial.len();
    if partial > 0 {
        let names = join_requirements(m.partial.iter().map(|i| i.requirement.as_str()));
        a.conditional(
            format!("{partial} mandatory requirement(s) only partially met: {names}"),
            MANDATORY_PARTIAL_PENALTY.saturating_mul(count_i32(partial)),
        );
    }

    if unmet == 0 && partial <= 1 {
        a.strength("All mandatory requirements addressed");
    }
}

fn compliance_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    let Some(c) = &signals.compliance else {
        return;
    };
    if !c.score.is_finite() {
        return;
    }
    let score = c.score;
    // Floor so the printed value never crosses the threshold it was judged by.
    let shown = score.floor();
    if score < COMPLIANCE_CRITICAL_BELOW {
        a.critical(
            format!("Compliance score critically low ({shown:.0}/100)"),
            COMPLIANCE_CRITICAL_PENALTY,
        );
    } else if score < COMPLIANCE_CONDITIONAL_BELOW {
        a.conditional(
            format!("Compliance score below target ({shown:.0}/100)"),
            COMPLIANCE_CONDITIONAL_PENALTY,
        );
    } else if score >= COMPLIANCE_STRONG_FROM {
        a.strength(format!("Strong compliance posture ({shown:.0}/100)"));
    }
}

fn risk_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    let Some(risks) = &signals.risks else {
        return;
    };
    let high = risks.iter().filter(|r| r.severity.is_high_or_worse()).count();
    let medium = risks
        .iter()
        .filter(|r| r.severity == Severity::Medium)
        .count();

    if high >= RISK_MANY_HIGH {
        a.critical(
            format!("{high} high-severity risks identified"),
            RISK_MANY_HIGH_PENALTY,
        );
    } else if high > 0 {
        let first = risks
            .iter()
            .find(|r| r.severity.is_high_or_worse())
            .map(|r| r.description.as_str())
            .unwrap_or_default();
        a.conditional(
            format!("{high} high-severity risk(s) to mitigate, e.g. {first}"),
            RISK_PER_HIGH_PENALTY.saturating_mul(count_i32(high)),
        );
    }

    if medium > RISK_MEDIUM_LIMIT {
        a.conditional(
            format!("{medium} medium-severity risks identified"),
            RISK_MEDIUM_PENALTY,
        );
    }

    if high == 0 && medium <= 1 {
        a.strength("Low risk profile");
    }
}

fn hidden_fee_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    let Some(p) = &signals.pricing else {
        return;
    };
    if p.hidden_fees.is_empty() {
        a.strength("Transparent pricing with no hidden fees");
        return;
    }
    let severe: Vec<&str> = p
        .hidden_fees
        .iter()
        .filter(|f| f.severity.is_high_or_worse())
        .map(|f| f.description.as_str())
        .collect();
    if !severe.is_empty() {
        a.conditional(
            format!(
                "Significant hidden fees flagged: {}",
                join_requirements(severe.into_iter())
            ),
            HIDDEN_FEE_PENALTY,
        );
    }
}

fn coverage_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    let Some(c) = &signals.requirements_coverage else {
        return;
    };
    if c.requirements.is_none() {
        return;
    }
    let unmet = c.count(CoverageStatus::DoesNotMeet);
    let partial = c.count(CoverageStatus::Partial);

    if unmet > COVERAGE_UNMET_LIMIT {
        a.conditional(
            format!("{unmet} requirements not met by the response"),
            COVERAGE_GAP_PENALTY,
        );
    } else if unmet == 0 && partial <= COVERAGE_STRENGTH_MAX_PARTIAL {
        a.strength("Comprehensive requirements coverage");
    }
}

fn demo_rule(signals: &ExtractedSignals, a: &mut Assessment) {
    match signals.demo.as_ref().and_then(|d| d.overall_rating) {
        Some(DemoRating::Excellent) => a.strength("Excellent product demonstration"),
        Some(DemoRating::Good) => a.strength("Good product demonstration"),
        _ => {}
    }
}

// --- rationale ---

fn rationale(indicator: ReadinessIndicator, score: i32, a: &Assessment) -> String {
    match indicator {
        ReadinessIndicator::NotReady if a.critical.is_empty() => {
            let mut msg = format!(
                "Not ready for award (score {score}/100): accumulated deductions put the score below {NOT_READY_BELOW}."
            );
            push_citation(&mut msg, "Main concerns", &a.conditional);
            msg
        }
        ReadinessIndicator::NotReady => {
            let mut msg = format!(
                "Not ready for award (score {score}/100): {} critical issue(s) must be resolved.",
                a.critical.len()
            );
            push_citation(&mut msg, "Key blockers", &a.critical);
            msg
        }
        ReadinessIndicator::Conditional => {
            let mut msg = format!(
                "Conditionally ready (score {score}/100): proceed once the listed items are addressed."
            );
            let drivers: Vec<String> = a
                .critical
                .iter()
                .chain(a.conditional.iter())
                .cloned()
                .collect();
            push_citation(&mut msg, "Conditions", &drivers);
            msg
        }
        ReadinessIndicator::Ready => {
            let mut msg = format!("Ready for award (score {score}/100) with no blocking issues.");
            push_citation(&mut msg, "Strengths", &a.strengths);
            msg
        }
    }
}

fn push_citation(msg: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let cited: Vec<&str> = items
        .iter()
        .take(RATIONALE_CITATIONS)
        .map(String::as_str)
        .collect();
    msg.push(' ');
    msg.push_str(label);
    msg.push_str(": ");
    msg.push_str(&cited.join("; "));
    if items.len() > RATIONALE_CITATIONS {
        msg.push_str(&format!(" (+{} more)", items.len() - RATIONALE_CITATIONS));
    }
    msg.push('.');
}

fn join_requirements<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn count_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
