use crate::store::{StoreError, TimestampField};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Record families the clearance report can be run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    Task,
    Matter,
    Case,
}

impl RecordType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Task, Self::Matter, Self::Case]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Matter => "Matter",
            Self::Case => "Case",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            Self::Task => "Tasks",
            Self::Matter => "Matters",
            Self::Case => "Cases",
        }
    }

    /// Status sets and completion field used when counting this record type.
    pub const fn policy(self) -> ClearancePolicy {
        match self {
            Self::Task => ClearancePolicy {
                terminal_statuses: &["Cancelled", "Completed"],
                cancelled_status: "Cancelled",
                completion_status: "Completed",
                completion_field: TimestampField::CompletedOn,
            },
            Self::Matter => ClearancePolicy {
                terminal_statuses: &["Cancelled", "Completed"],
                cancelled_status: "Cancelled",
                completion_status: "Completed",
                completion_field: TimestampField::Modified,
            },
            Self::Case => ClearancePolicy {
                terminal_statuses: &["Disposed", "NOC"],
                cancelled_status: "Cancelled",
                completion_status: "Disposed",
                completion_field: TimestampField::DateOfDisposal,
            },
        }
    }
}

impl FromStr for RecordType {
    type Err = ClearanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label() == trimmed)
            .ok_or_else(|| ClearanceError::InvalidReportType(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearancePolicy {
    /// Statuses treated as already resolved when counting the carried-over backlog.
    pub terminal_statuses: &'static [&'static str],
    pub cancelled_status: &'static str,
    pub completion_status: &'static str,
    pub completion_field: TimestampField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Periodicity {
    #[default]
    Monthly,
    Quarterly,
    #[serde(rename = "Half-Yearly")]
    HalfYearly,
    Yearly,
}

impl Periodicity {
    pub const fn ordered() -> [Self; 4] {
        [Self::Monthly, Self::Quarterly, Self::HalfYearly, Self::Yearly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::HalfYearly => "Half-Yearly",
            Self::Yearly => "Yearly",
        }
    }

    /// Calendar months per bucket; `None` means the whole range is one bucket.
    pub const fn step_months(self) -> Option<u32> {
        match self {
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::HalfYearly => Some(6),
            Self::Yearly => None,
        }
    }
}

impl FromStr for Periodicity {
    type Err = ClearanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|periodicity| periodicity.label() == trimmed)
            .ok_or_else(|| ClearanceError::InvalidPeriodicity(trimmed.to_string()))
    }
}

/// Which filter inputs drive the reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSelection {
    FiscalYear,
    #[default]
    DateRange,
}

impl DateSelection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FiscalYear => "Fiscal Year",
            Self::DateRange => "Date Range",
        }
    }

    /// Anything other than "Fiscal Year" selects the explicit date range.
    pub fn from_label(value: &str) -> Self {
        if value.trim() == Self::FiscalYear.label() {
            Self::FiscalYear
        } else {
            Self::DateRange
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClearanceError {
    #[error("Invalid date range")]
    InvalidDateRange,
    #[error("Invalid periodicity: {0:?}")]
    InvalidPeriodicity(String),
    #[error("Invalid report type: {0:?}")]
    InvalidReportType(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClearanceError {
    /// True for failures caused by the request filters rather than the record store.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
