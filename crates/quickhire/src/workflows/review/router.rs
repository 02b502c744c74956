use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::CandidateId;
use super::extraction::{ExtractionError, FilterExtractor};
use super::filter::FilterSpec;
use super::service::{ReviewService, ReviewServiceError};

/// Router builder exposing the review surface as JSON endpoints.
pub fn review_router<X>(service: Arc<ReviewService<X>>) -> Router
where
    X: FilterExtractor + 'static,
{
    Router::new()
        .route("/api/v1/candidates", get(browse_handler::<X>))
        .route("/api/v1/candidates/facets", get(facets_handler::<X>))
        .route(
            "/api/v1/candidates/filters",
            put(set_filters_handler::<X>).delete(reset_filters_handler::<X>),
        )
        .route("/api/v1/candidates/page", put(set_page_handler::<X>))
        .route("/api/v1/candidates/search", post(search_handler::<X>))
        .route(
            "/api/v1/candidates/:candidate_id/shortlist",
            post(add_shortlist_handler::<X>).delete(remove_shortlist_handler::<X>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/selection",
            post(add_selection_handler::<X>).delete(remove_selection_handler::<X>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/selection/reason",
            put(set_reason_handler::<X>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/rejection",
            post(add_rejection_handler::<X>).delete(remove_rejection_handler::<X>),
        )
        .route("/api/v1/shortlist", get(shortlist_handler::<X>))
        .route("/api/v1/rejected", get(rejected_handler::<X>))
        .route("/api/v1/selection", get(selection_handler::<X>))
        .route("/api/v1/selection/diversity", get(diversity_handler::<X>))
        .route("/api/v1/filters/extract", post(extract_handler::<X>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageRequest {
    pub(crate) page: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReasonRequest {
    pub(crate) reason: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractRequest {
    pub(crate) prompt: String,
}

pub(crate) async fn browse_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    Json(service.browse(Utc::now())).into_response()
}

pub(crate) async fn facets_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    Json(service.facets()).into_response()
}

pub(crate) async fn set_filters_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Json(spec): Json<FilterSpec>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    service.set_filters(spec);
    Json(service.filters()).into_response()
}

pub(crate) async fn reset_filters_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    service.reset_filters();
    Json(service.filters()).into_response()
}

pub(crate) async fn set_page_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Json(request): Json<PageRequest>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    service.set_page(request.page);
    Json(service.browse(Utc::now())).into_response()
}

pub(crate) async fn search_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Json(request): Json<SearchRequest>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    service.search_now(request.text, Utc::now());
    Json(service.browse(Utc::now())).into_response()
}

pub(crate) async fn add_shortlist_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.add_to_shortlist(&CandidateId(candidate_id)))
}

pub(crate) async fn remove_shortlist_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.remove_from_shortlist(&CandidateId(candidate_id)))
}

pub(crate) async fn add_selection_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.add_to_final_selection(&CandidateId(candidate_id)))
}

pub(crate) async fn remove_selection_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.remove_from_final_selection(&CandidateId(candidate_id)))
}

pub(crate) async fn set_reason_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
    Json(request): Json<ReasonRequest>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.set_selection_reason(&CandidateId(candidate_id), request.reason))
}

pub(crate) async fn add_rejection_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.add_to_rejected(&CandidateId(candidate_id)))
}

pub(crate) async fn remove_rejection_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    respond(service.remove_from_rejected(&CandidateId(candidate_id)))
}

pub(crate) async fn shortlist_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    Json(service.shortlist_view()).into_response()
}

pub(crate) async fn rejected_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    Json(service.rejected_view()).into_response()
}

pub(crate) async fn selection_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    Json(service.selection_view()).into_response()
}

pub(crate) async fn diversity_handler<X>(State(service): State<Arc<ReviewService<X>>>) -> Response
where
    X: FilterExtractor + 'static,
{
    match service.diversity() {
        Some(report) => Json(report).into_response(),
        None => Json(json!({
            "empty": true,
            "message": "No team selected yet. Complete your final selection to see diversity analytics.",
        }))
        .into_response(),
    }
}

pub(crate) async fn extract_handler<X>(
    State(service): State<Arc<ReviewService<X>>>,
    Json(request): Json<ExtractRequest>,
) -> Response
where
    X: FilterExtractor + 'static,
{
    match service.extract_filters(&request.prompt).await {
        Ok(spec) => Json(spec).into_response(),
        Err(error) => error_response(error),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, ReviewServiceError>) -> Response {
    match result {
        Ok(view) => Json(view).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ReviewServiceError) -> Response {
    match error {
        ReviewServiceError::UnknownCandidate(id) => {
            let payload = json!({ "error": format!("unknown candidate id: {id}") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ReviewServiceError::ExtractionBusy => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        ReviewServiceError::Extraction(error) => {
            let status = match &error {
                ExtractionError::MissingApiKey => StatusCode::BAD_REQUEST,
                ExtractionError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                ExtractionError::InvalidCredential
                | ExtractionError::Service { .. }
                | ExtractionError::EmptyResponse
                | ExtractionError::MalformedResponse(_)
                | ExtractionError::Network(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "error": error.user_message(),
                "detail": error.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}
