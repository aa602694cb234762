// tests/metrics_endpoint.rs
use shuttle_axum::axum::body::{self, Body};
use shuttle_axum::axum::http::{Request, StatusCode};
use shuttle_axum::axum::Router;
use tower::ServiceExt;

// Build full in-process app (includes /metrics when gated via env).
async fn build_app() -> Router {
    std::env::set_var(supplier_readiness::ENV_DEBUG_ROUTES, "1");
    std::env::remove_var(supplier_readiness::config::ENV_ENGINE_CONFIG_PATH);
    supplier_readiness::app()
        .await
        .expect("app() should build Router in tests")
}

#[serial_test::serial]
#[tokio::test]
async fn metrics_endpoint_reports_engine_counters() {
    let app = build_app().await;

    let r = app
        .clone()
        .oneshot(
            Request::post("/readiness")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"supplierId":"m-1","compliance":{"score":55}}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    let r = app
        .clone()
        .oneshot(
            Request::post("/compare")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"suppliers":[{"supplierId":"a"}],"weightOverrides":[{"id":"vibes","weight":3}]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    // Same process so counters persist.
    let m = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(m.status(), StatusCode::OK);
    let body = body::to_bytes(m.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "supplier_readiness_verdicts_total",
        "supplier_comparisons_total",
        "supplier_weight_override_unknown_total",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
