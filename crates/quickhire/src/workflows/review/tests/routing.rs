use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::review::extraction::ExtractionError;

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request builds")
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn browse_route_returns_the_first_page() {
    let (router, _service) = review_router_with_service(build_service());

    let response = router
        .oneshot(get("/api/v1/candidates"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["page"], 1);
    assert_eq!(payload["total_candidates"], 5);
    assert_eq!(payload["candidates"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn facets_route_lists_distinct_values() {
    let (router, _service) = review_router_with_service(build_service());

    let response = router
        .oneshot(get("/api/v1/candidates/facets"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["locations"],
        json!(["Austin", "New York", "San Francisco"])
    );
}

#[tokio::test]
async fn filter_routes_update_and_reset_the_spec() {
    let (router, service) = review_router_with_service(build_service());

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/filters",
            json!({ "experienceLevel": "Senior" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["experienceLevel"], "Senior");

    let view = service.browse(t0());
    assert_eq!(view.total_matches, 2);

    let response = router
        .oneshot(
            Request::delete("/api/v1/candidates/filters")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(service.filters().is_empty());
}

#[tokio::test]
async fn search_route_commits_immediately() {
    let (router, service) = review_router_with_service(build_service());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates/search",
            json!({ "text": "python" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_matches"], 1);
    assert_eq!(service.filters().search, "python");
}

#[tokio::test]
async fn shortlist_route_transitions_a_candidate() {
    let (router, service) = review_router_with_service(build_service());
    let id = id_at(service.store(), 0);

    let response = router
        .oneshot(post_empty(&format!("/api/v1/candidates/{id}/shortlist")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "shortlisted");
    assert_eq!(payload["counts"]["shortlisted"], 1);
}

#[tokio::test]
async fn transition_routes_return_not_found_for_unknown_ids() {
    let (router, _service) = review_router_with_service(build_service());

    let response = router
        .oneshot(post_empty("/api/v1/candidates/no-such-id/rejection"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("unknown candidate"));
}

#[tokio::test]
async fn selection_routes_cover_reason_and_diversity() {
    let (router, service) = review_router_with_service(build_service());
    let alice = id_at(service.store(), 0);
    let carol = id_at(service.store(), 2);

    for id in [&alice, &carol] {
        let response = router
            .clone()
            .oneshot(post_empty(&format!("/api/v1/candidates/{id}/selection")))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/candidates/{alice}/selection/reason"),
            json!({ "reason": "deep React experience" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get("/api/v1/selection"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(2));
    assert_eq!(payload[0]["reason"], "deep React experience");

    let response = router
        .oneshot(get("/api/v1/selection/diversity"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["locations"][0]["value"], "New York");
    assert_eq!(payload["locations"][0]["count"], 2);
}

#[tokio::test]
async fn diversity_route_reports_the_empty_state() {
    let (router, _service) = review_router_with_service(build_service());

    let response = router
        .oneshot(get("/api/v1/selection/diversity"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["empty"], true);
}

#[tokio::test]
async fn extract_route_maps_missing_key_to_bad_request() {
    let (router, _service) = review_router_with_service(build_service_with(
        StubExtractor::returning(Err(ExtractionError::MissingApiKey)),
    ));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/filters/extract",
            json!({ "prompt": "senior engineers in new york" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        "Please provide a Google Gemini API key to use AI search"
    );
}

#[tokio::test]
async fn extract_route_maps_rate_limits_to_too_many_requests() {
    let (router, service) = review_router_with_service(build_service_with(
        StubExtractor::returning(Err(ExtractionError::RateLimited)),
    ));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/filters/extract",
            json!({ "prompt": "cheap hires" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(service.filters().is_empty(), "failed extraction must not touch filters");
}

#[tokio::test]
async fn page_route_moves_the_session_page() {
    let (router, _service) = review_router_with_service(build_service());

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/page",
            json!({ "page": 2 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["page"], 2);
    // Five candidates fit on one page, so page 2 is empty but well-formed.
    assert_eq!(payload["candidates"].as_array().map(Vec::len), Some(0));
    assert_eq!(payload["total_pages"], 1);
}
