use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use quickhire::config::{AiConfig, DatasetConfig};
use quickhire::error::AppError;
use quickhire::workflows::review::{CandidateStore, GeminiExtractor, ReviewService};
use tracing::warn;

/// Sample dataset baked into the binary for demos and as a serve fallback.
pub(crate) const SAMPLE_DATASET: &str = include_str!("../data/candidates.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the candidate dataset from the configured path, falling back to the
/// embedded sample when no path is configured.
pub(crate) fn load_candidate_store(config: &DatasetConfig) -> Result<CandidateStore, AppError> {
    match &config.path {
        Some(path) => load_candidate_store_from_path(path),
        None => {
            warn!("CANDIDATES_PATH not set; serving the embedded sample dataset");
            Ok(CandidateStore::from_json_slice(SAMPLE_DATASET.as_bytes())?)
        }
    }
}

pub(crate) fn load_candidate_store_from_path(path: &Path) -> Result<CandidateStore, AppError> {
    let data = std::fs::read(path)?;
    Ok(CandidateStore::from_json_slice(&data)?)
}

pub(crate) fn build_review_service(
    store: CandidateStore,
    ai: &AiConfig,
) -> ReviewService<GeminiExtractor> {
    let extractor = Arc::new(GeminiExtractor::new(ai));
    ReviewService::new(store, extractor)
}
