use super::{CountFilter, Record, RecordStore, StoreError};
use crate::reports::clearance::RecordType;
use std::collections::HashMap;

/// Record store held entirely in memory, keyed by record type.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    records: HashMap<RecordType, Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records<I>(mut self, record_type: RecordType, records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.extend(record_type, records);
        self
    }

    pub fn insert(&mut self, record_type: RecordType, record: Record) {
        self.records.entry(record_type).or_default().push(record);
    }

    pub fn extend<I>(&mut self, record_type: RecordType, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.records.entry(record_type).or_default().extend(records);
    }

    pub fn records(&self, record_type: RecordType) -> &[Record] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self, record_type: RecordType) -> usize {
        self.records(record_type).len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(Vec::is_empty)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn count(&self, record_type: RecordType, filter: &CountFilter) -> Result<u64, StoreError> {
        let matched = self
            .records(record_type)
            .iter()
            .filter(|record| filter.matches(record))
            .count();
        Ok(matched as u64)
    }
}
