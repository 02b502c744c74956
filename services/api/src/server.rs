use crate::cli::ServeArgs;
use crate::infra::{build_review_service, load_candidate_store, AppState};
use crate::routes::{dataset_unavailable_router, with_review_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quickhire::config::AppConfig;
use quickhire::error::AppError;
use quickhire::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{error, info};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = match load_candidate_store(&config.dataset) {
        Ok(store) => {
            let service = Arc::new(build_review_service(store, &config.ai));
            with_review_routes(service)
        }
        Err(err) => {
            error!(%err, "candidate dataset failed to load; serving empty state");
            dataset_unavailable_router(err.to_string())
        }
    };

    let app = app
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
