use crate::cli::ServeArgs;
use crate::infra::{build_stores, AppState};
use crate::routes::with_checkup_routes;
use axum::http::HeaderValue;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use riskcheck::checkup::{AdminAccess, Catalog, CheckupService};
use riskcheck::config::{AppConfig, CorsConfig, StorageMode};
use riskcheck::error::AppError;
use riskcheck::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.storage.mode == StorageMode::Disabled {
        warn!("storage is not configured; assessment and lead endpoints will answer 503");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(Catalog::business_legal_v1());
    let (assessments, leads) = build_stores(config.storage.mode);
    let service = Arc::new(CheckupService::new(catalog, assessments, leads));
    let admin = AdminAccess::new(config.admin.key.clone());

    let app = with_checkup_routes(service, admin)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "risk checkup service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors(config: &CorsConfig) -> CorsLayer {
    if config.allow_any() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
