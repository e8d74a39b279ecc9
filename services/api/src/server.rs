use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_service_routes;
use axum_prometheus::PrometheusMetricLayer;
use clearance_rates::config::AppConfig;
use clearance_rates::error::AppError;
use clearance_rates::reports::clearance::{ClearanceReportService, RecordType};
use clearance_rates::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.data.data_dir = Some(data_dir);
    }

    telemetry::init(&config.telemetry)?;

    let store = load_store(config.data.data_dir.as_deref())?;
    for record_type in RecordType::ordered() {
        info!(
            record_type = record_type.label(),
            records = store.len(record_type),
            "record store loaded"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(ClearanceReportService::new(Arc::new(store)));
    let app = with_service_routes(service, app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "clearance rate service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
