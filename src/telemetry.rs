// src/telemetry.rs
//! Prometheus exposition for the HTTP surface. Engine functions stay free of
//! metrics; handlers record counters after each call.

use anyhow::{anyhow, Result};
use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use shuttle_axum::axum::{routing::get, Router};

use crate::category::CategoryReadiness;
use crate::readiness::ReadinessAnalysis;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Telemetry {
    pub handle: PrometheusHandle,
}

impl Telemetry {
    /// Install the Prometheus recorder once per process.
    pub fn init() -> Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| anyhow!("prometheus: install recorder: {e}"))
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Router exposing `/metrics` in the Prometheus text format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_comparison(cohort: usize, unknown_overrides: usize) {
    counter!("supplier_comparisons_total").increment(1);
    histogram!("supplier_comparison_cohort_size").record(cohort as f64);
    if unknown_overrides > 0 {
        counter!("supplier_weight_override_unknown_total").increment(unknown_overrides as u64);
    }
}

pub fn record_readiness(analysis: &ReadinessAnalysis) {
    counter!(
        "supplier_readiness_verdicts_total",
        "indicator" => analysis.indicator.to_string()
    )
    .increment(1);
    histogram!("supplier_readiness_score").record(f64::from(analysis.score));
}

pub fn record_category(result: &CategoryReadiness) {
    counter!("supplier_category_readiness_total").increment(1);
    histogram!("supplier_category_overall_score").record(f64::from(result.overall_score));
    counter!("supplier_compliance_flags_total").increment(result.compliance_flags.len() as u64);
}
