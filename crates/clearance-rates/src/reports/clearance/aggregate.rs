use super::domain::{ClearanceError, Periodicity, RecordType};
use super::period::{segment, Period};
use super::range::DateRange;
use super::views::ClearanceRow;
use crate::store::{CountFilter, RecordStore, StatusFilter, TimeFilter, TimestampField};
use std::sync::Arc;
use tracing::debug;

/// Counts backlog and completions per period against a record store.
pub struct ClearanceCalculator<S> {
    store: Arc<S>,
}

impl<S> Clone for ClearanceCalculator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ClearanceCalculator<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn rows(
        &self,
        record_type: RecordType,
        range: &DateRange,
        periodicity: Periodicity,
    ) -> Result<Vec<ClearanceRow>, ClearanceError> {
        segment(range, periodicity)
            .iter()
            .map(|period| self.row(record_type, period))
            .collect()
    }

    pub fn row(&self, record_type: RecordType, period: &Period) -> Result<ClearanceRow, ClearanceError> {
        let total = self.total(record_type, period)?;
        let completed = self.completed(record_type, period)?;
        debug!(
            record_type = record_type.label(),
            period = %period.label,
            total,
            completed,
            "counted clearance period"
        );

        Ok(ClearanceRow {
            period: period.label.clone(),
            total,
            completed,
            clearance_rate: clearance_rate(completed, total),
        })
    }

    /// Open backlog carried into the period plus non-cancelled records created during it.
    pub fn total(&self, record_type: RecordType, period: &Period) -> Result<u64, ClearanceError> {
        let policy = record_type.policy();

        let pending_before = self.store.count(
            record_type,
            &CountFilter {
                status: StatusFilter::not_in(policy.terminal_statuses),
                field: TimestampField::Creation,
                time: TimeFilter::Before(period.start_bound()),
            },
        )?;

        let created_in_period = self.store.count(
            record_type,
            &CountFilter {
                status: StatusFilter::NotEquals(policy.cancelled_status.to_string()),
                field: TimestampField::Creation,
                time: within(period),
            },
        )?;

        Ok(pending_before + created_in_period)
    }

    /// Records that reached the completion status with a completion stamp inside the period.
    pub fn completed(&self, record_type: RecordType, period: &Period) -> Result<u64, ClearanceError> {
        let policy = record_type.policy();

        let completed = self.store.count(
            record_type,
            &CountFilter {
                status: StatusFilter::Equals(policy.completion_status.to_string()),
                field: policy.completion_field,
                time: within(period),
            },
        )?;

        Ok(completed)
    }
}

fn within(period: &Period) -> TimeFilter {
    TimeFilter::Within {
        start: period.start_bound(),
        end: period.end_bound(),
    }
}

/// `completed / total` as a percentage; zero when there is no workload.
pub fn clearance_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}
