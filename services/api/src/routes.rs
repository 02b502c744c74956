use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use axum::Router;
use quickhire::workflows::review::{review_router, FilterExtractor, ReviewService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_review_routes<X>(service: Arc<ReviewService<X>>) -> Router
where
    X: FilterExtractor + 'static,
{
    review_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// Served instead of the review routes when the dataset failed to load: the
/// failure becomes an empty-state response, not a crash.
pub(crate) fn dataset_unavailable_router(message: String) -> Router {
    let message = Arc::new(message);
    Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .fallback(move || {
            let message = message.clone();
            async move {
                let payload = json!({
                    "empty": true,
                    "error": message.as_str(),
                });
                (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
            }
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(payload) = healthcheck().await;
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn fallback_router_serves_the_empty_state() {
        let router = dataset_unavailable_router("no candidates data found".to_string());

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/candidates")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["empty"], true);
        assert_eq!(payload["error"], "no candidates data found");

        // Health stays reachable so orchestration can see the process.
        let response = router
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
