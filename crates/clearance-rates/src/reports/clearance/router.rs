use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::json;
use tracing::warn;

use super::filters::definitions;
use super::service::{ClearanceReportRequest, ClearanceReportService};
use crate::store::RecordStore;

pub const REPORT_PATH: &str = "/api/v1/reports/clearance-rates";
pub const FILTERS_PATH: &str = "/api/v1/reports/clearance-rates/filters";

/// Router exposing the clearance report and its filter form.
pub fn clearance_router<S>(service: Arc<ClearanceReportService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(REPORT_PATH, post(report_handler::<S>))
        .route(FILTERS_PATH, get(filters_handler))
        .with_state(service)
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<ClearanceReportService<S>>>,
    Json(request): Json<ClearanceReportRequest>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.execute(&request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) if error.is_validation() => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(error) => {
            warn!(%error, "clearance report failed");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn filters_handler() -> Response {
    let today = Local::now().date_naive();
    (StatusCode::OK, Json(definitions(today))).into_response()
}
