use crate::infra::{parse_answers, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use rubric_assess::analytics::{BenchmarkResult, HistoryPoint, MAX_HISTORY_DAYS};
use rubric_assess::assessment::{AnalysisResult, SubcomponentSummary};
use rubric_assess::error::AppError;
use rubric_assess::AssessmentService;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const DEFAULT_HISTORY_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub(crate) struct BenchmarkQuery {
    pub(crate) score: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    pub(crate) days: Option<u32>,
}

/// Assessment endpoints plus health, readiness, and metrics.
pub(crate) fn with_assessment_routes(service: Arc<AssessmentService>) -> Router {
    assessment_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/rubrics", get(rubrics_endpoint))
        .route(
            "/api/v1/assessments/:subcomponent_id/analysis",
            post(analysis_endpoint),
        )
        .route(
            "/api/v1/assessments/:subcomponent_id/benchmark",
            get(benchmark_endpoint),
        )
        .route(
            "/api/v1/assessments/:subcomponent_id/history",
            get(history_endpoint),
        )
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rubrics_endpoint(
    State(service): State<Arc<AssessmentService>>,
) -> Json<Vec<SubcomponentSummary>> {
    Json(service.rubrics())
}

pub(crate) async fn analysis_endpoint(
    State(service): State<Arc<AssessmentService>>,
    Path(subcomponent_id): Path<String>,
    body: String,
) -> Result<Json<AnalysisResult>, AppError> {
    let fields = parse_answers(&body)?;
    let result = service.compute_analysis(&subcomponent_id, fields)?;
    info!(
        subcomponent = %subcomponent_id,
        total_score = result.total_score,
        tier = result.evaluation_tier.label(),
        "worksheet analysed"
    );
    Ok(Json(result))
}

pub(crate) async fn benchmark_endpoint(
    State(service): State<Arc<AssessmentService>>,
    Path(subcomponent_id): Path<String>,
    Query(query): Query<BenchmarkQuery>,
) -> Result<Json<BenchmarkResult>, AppError> {
    Ok(Json(
        service.estimate_benchmark(&subcomponent_id, query.score)?,
    ))
}

pub(crate) async fn history_endpoint(
    State(service): State<Arc<AssessmentService>>,
    Path(subcomponent_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryPoint>>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if days > MAX_HISTORY_DAYS {
        return Err(AppError::InvalidInput(format!(
            "days must not exceed {MAX_HISTORY_DAYS}"
        )));
    }
    Ok(Json(service.simulate_history(&subcomponent_id, days)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rubric_assess::assessment::{NoiseMode, RubricRegistry};
    use rubric_assess::config::EngineConfig;
    use serde_json::Value;
    use tower::ServiceExt;

    fn service() -> Arc<AssessmentService> {
        let registry = Arc::new(RubricRegistry::builtin().expect("builtin rubrics load"));
        Arc::new(AssessmentService::new(
            registry,
            EngineConfig {
                noise: NoiseMode::Disabled,
                ..EngineConfig::default()
            },
        ))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn analysis_route_scores_submission() {
        let router = assessment_router(service());
        let payload = json!({ "problem": "", "evidence": "" });

        let response = router
            .oneshot(
                Request::post("/api/v1/assessments/value-proposition/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["total_score"], 0);
        assert_eq!(body["evaluation_tier"]["label"], "Critical");
        assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn analysis_route_ignores_non_string_fields() {
        let router = assessment_router(service());
        let payload = json!({ "problem": "Slow invoicing", "rating": 4, "notes": null });

        let response = router
            .oneshot(
                Request::post("/api/v1/assessments/value-proposition/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["subcomponent_id"], "value-proposition");
        assert_eq!(body["evaluation_tier"]["label"], "Critical");
    }

    #[tokio::test]
    async fn analysis_route_rejects_non_object_body_as_json_error() {
        let router = assessment_router(service());

        let response = router
            .oneshot(
                Request::post("/api/v1/assessments/value-proposition/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("[\"problem\"]"))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "invalid input: answers must be a JSON object");
    }

    #[tokio::test]
    async fn unknown_subcomponent_is_not_found() {
        let router = assessment_router(service());

        let response = router
            .oneshot(
                Request::post("/api/v1/assessments/payroll/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "assessment 'payroll' is not available");
    }

    #[tokio::test]
    async fn benchmark_route_reports_status() {
        let response = benchmark_endpoint(
            State(service()),
            Path("market-analysis".to_string()),
            Query(BenchmarkQuery { score: 88 }),
        )
        .await
        .expect("benchmark builds");

        assert_eq!(response.0.percentile_bucket, "85th");
        assert!(response.0.synthetic);
    }

    #[tokio::test]
    async fn benchmark_route_rejects_scores_above_maximum() {
        let result = benchmark_endpoint(
            State(service()),
            Path("market-analysis".to_string()),
            Query(BenchmarkQuery { score: 140 }),
        )
        .await;

        match result {
            Err(err) => assert_eq!(err.status(), StatusCode::BAD_REQUEST),
            Ok(_) => panic!("expected bad request"),
        }
    }

    #[tokio::test]
    async fn history_route_defaults_to_thirty_days() {
        let router = assessment_router(service());

        let response = router
            .oneshot(
                Request::get("/api/v1/assessments/operations-plan/history")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(31));
    }

    #[tokio::test]
    async fn rubrics_route_lists_catalogue() {
        let Json(rubrics) = rubrics_endpoint(State(service())).await;
        assert_eq!(rubrics.len(), 4);
        assert_eq!(rubrics[0].subcomponent_id, "value-proposition");
    }
}
