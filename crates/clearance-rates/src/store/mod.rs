//! Read-only access to the task, matter, and case records the clearance
//! report counts over.
//!
//! The report only ever needs `COUNT(*)`-style answers, so the store contract
//! is a single `count` call taking a status filter and a timestamp filter.
//! Production deployments back it with whatever system owns the records; the
//! bundled [`InMemoryRecordStore`] serves tests and CSV-loaded snapshots.

pub mod import;
mod memory;

use crate::reports::clearance::RecordType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use import::{RecordImportError, RecordImporter};
pub use memory::InMemoryRecordStore;

/// Timestamp columns a count can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampField {
    Creation,
    Modified,
    CompletedOn,
    DateOfDisposal,
}

/// Snapshot of a single task, matter, or case row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub status: String,
    pub creation: NaiveDateTime,
    #[serde(default)]
    pub modified: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_on: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_of_disposal: Option<NaiveDateTime>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        creation: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            creation,
            modified: None,
            completed_on: None,
            date_of_disposal: None,
        }
    }

    pub fn timestamp(&self, field: TimestampField) -> Option<NaiveDateTime> {
        match field {
            TimestampField::Creation => Some(self.creation),
            TimestampField::Modified => self.modified,
            TimestampField::CompletedOn => self.completed_on,
            TimestampField::DateOfDisposal => self.date_of_disposal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    Equals(String),
    NotEquals(String),
    In(Vec<String>),
    NotIn(Vec<String>),
}

impl StatusFilter {
    pub fn not_in(statuses: &[&str]) -> Self {
        Self::NotIn(statuses.iter().map(|status| status.to_string()).collect())
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::Equals(expected) => status == expected,
            Self::NotEquals(excluded) => status != excluded,
            Self::In(allowed) => allowed.iter().any(|candidate| candidate == status),
            Self::NotIn(excluded) => !excluded.iter().any(|candidate| candidate == status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// Strictly earlier than the instant.
    Before(NaiveDateTime),
    /// Half-open window `[start, end)`.
    Within {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TimeFilter {
    /// Records with no value in the filtered column never match.
    pub fn matches(&self, value: Option<NaiveDateTime>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Self::Before(limit), Some(value)) => value < *limit,
            (Self::Within { start, end }, Some(value)) => value >= *start && value < *end,
        }
    }
}

/// A status predicate combined with a predicate on one timestamp column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountFilter {
    pub status: StatusFilter,
    pub field: TimestampField,
    pub time: TimeFilter,
}

impl CountFilter {
    pub fn matches(&self, record: &Record) -> bool {
        self.status.matches(&record.status) && self.time.matches(record.timestamp(self.field))
    }
}

/// Storage abstraction so the clearance calculator can be exercised in isolation.
pub trait RecordStore: Send + Sync {
    fn count(&self, record_type: RecordType, filter: &CountFilter) -> Result<u64, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
