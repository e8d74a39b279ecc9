use chrono::NaiveDate;
use clearance_rates::error::AppError;
use clearance_rates::reports::clearance::ClearanceReportService;
use clearance_rates::store::{InMemoryRecordStore, RecordImporter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ReportService = ClearanceReportService<InMemoryRecordStore>;

/// Loads CSV record exports, or starts empty when no directory is configured.
pub(crate) fn load_store(data_dir: Option<&Path>) -> Result<InMemoryRecordStore, AppError> {
    match data_dir {
        Some(dir) => Ok(RecordImporter::load_dir(dir)?),
        None => {
            warn!("no data directory configured; reports will show zero activity");
            Ok(InMemoryRecordStore::new())
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        let error = parse_date("2023-02-29").expect_err("not a leap year");
        assert!(error.contains("2023-02-29"));
    }

    #[test]
    fn missing_data_dir_yields_empty_store() {
        let store = load_store(None).expect("empty store");
        assert!(store.is_empty());
    }
}
