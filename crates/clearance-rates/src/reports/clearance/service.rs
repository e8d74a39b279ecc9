use super::aggregate::ClearanceCalculator;
use super::chart::build_chart;
use super::domain::{ClearanceError, DateSelection, Periodicity, RecordType};
use super::range::DateRange;
use super::views::{columns, ClearanceReport};
use crate::store::RecordStore;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::info;

/// Raw report filters as submitted by the filter form or an API client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceReportRequest {
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub periodicity: Option<String>,
    #[serde(default)]
    pub fiscal_or_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub from_date: Option<String>,
    #[serde(default)]
    pub to_date: Option<String>,
}

impl ClearanceReportRequest {
    pub fn fiscal_year(report_type: RecordType, periodicity: Periodicity, year: i32) -> Self {
        Self {
            report_type: Some(report_type.label().to_string()),
            periodicity: Some(periodicity.label().to_string()),
            fiscal_or_date: Some(DateSelection::FiscalYear.label().to_string()),
            year: Some(year.to_string()),
            from_date: None,
            to_date: None,
        }
    }

    pub fn date_range(
        report_type: RecordType,
        periodicity: Periodicity,
        from_date: &str,
        to_date: &str,
    ) -> Self {
        Self {
            report_type: Some(report_type.label().to_string()),
            periodicity: Some(periodicity.label().to_string()),
            fiscal_or_date: Some(DateSelection::DateRange.label().to_string()),
            year: None,
            from_date: Some(from_date.to_string()),
            to_date: Some(to_date.to_string()),
        }
    }

    /// Validates every filter before any store access happens.
    pub fn validate(&self) -> Result<ValidatedRequest, ClearanceError> {
        let report_type: RecordType = self.report_type.as_deref().unwrap_or_default().parse()?;
        let periodicity: Periodicity = match self.periodicity.as_deref() {
            Some(value) => value.parse()?,
            None => Periodicity::default(),
        };
        let selection = self
            .fiscal_or_date
            .as_deref()
            .map(DateSelection::from_label)
            .unwrap_or_default();
        let range = DateRange::resolve(
            selection,
            self.year.as_deref(),
            self.from_date.as_deref(),
            self.to_date.as_deref(),
        )?;

        Ok(ValidatedRequest {
            report_type,
            periodicity,
            range,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub report_type: RecordType,
    pub periodicity: Periodicity,
    pub range: DateRange,
}

/// Service composing filter validation, the calculator, and chart assembly.
pub struct ClearanceReportService<S> {
    calculator: ClearanceCalculator<S>,
}

impl<S> ClearanceReportService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            calculator: ClearanceCalculator::new(store),
        }
    }

    pub fn calculator(&self) -> &ClearanceCalculator<S> {
        &self.calculator
    }

    pub fn execute(
        &self,
        request: &ClearanceReportRequest,
    ) -> Result<ClearanceReport, ClearanceError> {
        let validated = request.validate()?;
        self.build(validated)
    }

    pub fn build(&self, request: ValidatedRequest) -> Result<ClearanceReport, ClearanceError> {
        let ValidatedRequest {
            report_type,
            periodicity,
            range,
        } = request;

        let rows = self.calculator.rows(report_type, &range, periodicity)?;
        let chart = build_chart(report_type, &rows);
        info!(
            report_type = report_type.label(),
            periodicity = periodicity.label(),
            from = %range.from(),
            to = %range.to(),
            periods = rows.len(),
            "clearance report generated"
        );

        Ok(ClearanceReport {
            report_type,
            periodicity,
            range,
            columns: columns(),
            rows,
            message: format!("{} Report", report_type.plural()),
            chart,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CountFilter, InMemoryRecordStore, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    impl RecordStore for CountingStore {
        fn count(&self, _: RecordType, _: &CountFilter) -> Result<u64, StoreError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(0)
        }
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn count(&self, _: RecordType, _: &CountFilter) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn unknown_report_type_fails_before_querying() {
        let store = Arc::new(CountingStore::default());
        let service = ClearanceReportService::new(store.clone());
        let mut request =
            ClearanceReportRequest::fiscal_year(RecordType::Task, Periodicity::Monthly, 2024);
        request.report_type = Some("Foo".to_string());

        let error = service.execute(&request).expect_err("report type rejected");
        assert!(matches!(error, ClearanceError::InvalidReportType(ref value) if value == "Foo"));
        assert_eq!(store.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn unknown_periodicity_and_bad_range_fail_before_querying() {
        let store = Arc::new(CountingStore::default());
        let service = ClearanceReportService::new(store.clone());

        let mut request =
            ClearanceReportRequest::fiscal_year(RecordType::Case, Periodicity::Monthly, 2024);
        request.periodicity = Some("Fortnightly".to_string());
        assert!(matches!(
            service.execute(&request),
            Err(ClearanceError::InvalidPeriodicity(_))
        ));

        let request = ClearanceReportRequest::date_range(
            RecordType::Case,
            Periodicity::Monthly,
            "2024-05-01",
            "2024-04-01",
        );
        assert!(matches!(
            service.execute(&request),
            Err(ClearanceError::InvalidDateRange)
        ));
        assert_eq!(store.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn missing_periodicity_defaults_to_monthly() {
        let request = ClearanceReportRequest {
            report_type: Some("Matter".to_string()),
            fiscal_or_date: Some("Fiscal Year".to_string()),
            year: Some("2024".to_string()),
            ..ClearanceReportRequest::default()
        };
        let validated = request.validate().expect("valid request");
        assert_eq!(validated.periodicity, Periodicity::Monthly);
        assert_eq!(validated.report_type, RecordType::Matter);
    }

    #[test]
    fn each_period_issues_three_counts() {
        let store = Arc::new(CountingStore::default());
        let service = ClearanceReportService::new(store.clone());
        let request =
            ClearanceReportRequest::fiscal_year(RecordType::Task, Periodicity::Quarterly, 2024);

        let report = service.execute(&request).expect("report builds");
        assert_eq!(report.rows.len(), 4);
        assert_eq!(store.calls.load(Ordering::Relaxed), 12);
    }

    #[test]
    fn store_failures_abort_the_report() {
        let service = ClearanceReportService::new(Arc::new(FailingStore));
        let request =
            ClearanceReportRequest::fiscal_year(RecordType::Task, Periodicity::Yearly, 2024);

        let error = service.execute(&request).expect_err("store failure surfaces");
        assert!(matches!(error, ClearanceError::Store(StoreError::Unavailable(_))));
        assert!(!error.is_validation());
    }

    #[test]
    fn report_carries_columns_message_and_chart() {
        let service = ClearanceReportService::new(Arc::new(InMemoryRecordStore::new()));
        let request =
            ClearanceReportRequest::fiscal_year(RecordType::Case, Periodicity::HalfYearly, 2024);

        let report = service.execute(&request).expect("report builds");
        assert_eq!(report.columns.len(), 4);
        assert_eq!(report.columns[3].fieldname, "clearance_rate");
        assert_eq!(report.message, "Cases Report");
        assert_eq!(
            report.chart.data.labels,
            vec!["Jan 2024 - Jun 2024", "Jul 2024 - Dec 2024"]
        );
    }

    #[test]
    fn year_accepts_numbers_in_json() {
        let request: ClearanceReportRequest = serde_json::from_str(
            r#"{"report_type":"Task","fiscal_or_date":"Fiscal Year","year":2024}"#,
        )
        .expect("request parses");
        assert_eq!(request.year.as_deref(), Some("2024"));
    }
}
