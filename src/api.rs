//! HTTP surface for the host application.
//! Thin JSON wrappers over the pure engine functions; nothing is persisted.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::category::{calculate_category_readiness_with, CategoryReadiness, StructuredAnswers};
use crate::config::{EngineConfig, HotReloadConfig};
use crate::engine::{compare_cohort, CohortComparison};
use crate::readiness::{classify_readiness, ReadinessAnalysis};
use crate::signals::{ExtractedSignals, SupplierIdentity};
use crate::telemetry;
use crate::weights::WeightOverride;

#[derive(Clone)]
pub struct AppState {
    config: Arc<HotReloadConfig>,
}

impl AppState {
    pub fn new(config: HotReloadConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Fixed configuration, no file behind it (tests, embedding).
    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(HotReloadConfig::new(PathBuf::new(), config))
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(HotReloadConfig::from_env()?))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/compare", post(compare))
        .route("/readiness", post(readiness))
        .route("/readiness/batch", post(readiness_batch))
        .route("/category-readiness", post(category_readiness))
        .route("/debug/config", get(debug_config))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareReq {
    #[serde(default)]
    suppliers: Vec<ExtractedSignals>,
    #[serde(default)]
    weight_overrides: Option<Vec<WeightOverride>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResp {
    evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    comparison: CohortComparison,
}

async fn compare(State(state): State<AppState>, Json(body): Json<CompareReq>) -> Json<CompareResp> {
    let cfg = state.config.current();
    let comparison = compare_cohort(
        &body.suppliers,
        body.weight_overrides.as_deref(),
        &cfg.weights,
    );
    telemetry::record_comparison(body.suppliers.len(), comparison.unknown_weight_ids.len());
    Json(CompareResp {
        evaluated_at: Utc::now(),
        comparison,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessResp {
    #[serde(flatten)]
    supplier: SupplierIdentity,
    evaluated_at: DateTime<Utc>,
    analysis: ReadinessAnalysis,
}

fn readiness_for(signals: &ExtractedSignals, at: DateTime<Utc>) -> ReadinessResp {
    let analysis = classify_readiness(signals);
    telemetry::record_readiness(&analysis);
    ReadinessResp {
        supplier: signals.supplier.clone(),
        evaluated_at: at,
        analysis,
    }
}

async fn readiness(Json(body): Json<ExtractedSignals>) -> Json<ReadinessResp> {
    Json(readiness_for(&body, Utc::now()))
}

async fn readiness_batch(Json(items): Json<Vec<ExtractedSignals>>) -> Json<Vec<ReadinessResp>> {
    let now = Utc::now();
    Json(items.iter().map(|s| readiness_for(s, now)).collect())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryResp {
    evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    result: CategoryReadiness,
}

async fn category_readiness(
    State(state): State<AppState>,
    Json(answers): Json<StructuredAnswers>,
) -> Json<CategoryResp> {
    let cfg = state.config.current();
    let result = calculate_category_readiness_with(&answers, &cfg.category);
    telemetry::record_category(&result);
    Json(CategoryResp {
        evaluated_at: Utc::now(),
        result,
    })
}

async fn debug_config(State(state): State<AppState>) -> Json<EngineConfig> {
    Json(state.config.current())
}
