//! Clearance rates: how much of the open workload was cleared in each period.
//!
//! A request names a record type, a periodicity, and either a fiscal year or an
//! explicit date range. The range is cut into periods and, for every period,
//! the calculator asks the [`RecordStore`](crate::store::RecordStore) for the
//! backlog carried in, the records created, and the records completed.

mod aggregate;
mod chart;
pub mod domain;
pub mod filters;
mod period;
mod range;
pub mod router;
mod service;
pub mod views;

pub use aggregate::{clearance_rate, ClearanceCalculator};
pub use chart::{
    build_chart, AxisScale, ChartData, ChartDataset, ChartOptions, ChartScales, ChartSpec,
};
pub use domain::{ClearanceError, ClearancePolicy, DateSelection, Periodicity, RecordType};
pub use filters::{FilterDefinition, FilterKind};
pub use period::{period_label, segment, Period};
pub use range::{parse_filter_date, DateRange};
pub use router::clearance_router;
pub use service::{ClearanceReportRequest, ClearanceReportService, ValidatedRequest};
pub use views::{ClearanceReport, ClearanceRow, ColumnKind, ReportColumn};
