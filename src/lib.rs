// src/lib.rs
// Public library surface for the binary, integration tests and embedding hosts.

pub mod api;
pub mod config;
pub mod telemetry;

// Comparison path
pub mod aggregate;
pub mod engine;
pub mod metrics;
pub mod normalize;
pub mod signals;
pub mod weights;

// Classification paths
pub mod category;
pub mod readiness;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate_scores, rank_breakdowns, ComparisonBreakdown, RankedBreakdown};
pub use crate::category::{
    calculate_category_readiness, calculate_category_readiness_with, CategoryBreakdown,
    CategoryReadiness, StructuredAnswers,
};
pub use crate::engine::{compare_cohort, CohortComparison};
pub use crate::metrics::{compute_base_metrics, BaseMetrics, MetricName};
pub use crate::normalize::{normalize_across_cohort, NormalizedMetrics};
pub use crate::readiness::{classify_readiness, ReadinessAnalysis, ReadinessIndicator};
pub use crate::signals::ExtractedSignals;
pub use crate::weights::{resolve_weights, MetricWeights, WeightOverride, WeightResolution};

use shuttle_axum::axum::Router;
use tracing::info;

/// Env switch that mounts `/metrics`.
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

/// Build the full router the binary serves: API routes, plus `/metrics`
/// when `DEBUG_ROUTES=1`.
pub async fn app() -> anyhow::Result<Router> {
    let state = api::AppState::from_env()?;
    let mut router = api::router(state);

    if std::env::var(ENV_DEBUG_ROUTES).ok().as_deref() == Some("1") {
        let t = telemetry::Telemetry::init()?;
        router = router.merge(t.router());
        info!("debug routes enabled: /metrics");
    }

    Ok(router)
}
