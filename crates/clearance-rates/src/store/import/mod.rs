mod parser;

use super::{InMemoryRecordStore, Record};
use crate::reports::clearance::RecordType;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    #[error("failed to read record export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing \"Created At\" timestamp")]
    MissingCreation { line: usize },
    #[error("line {line}: could not parse {column} value {value:?}")]
    InvalidTimestamp {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Loads record exports (one CSV per record type) into an in-memory store.
pub struct RecordImporter;

impl RecordImporter {
    /// File name expected inside a data directory for each record type.
    pub const fn file_name(record_type: RecordType) -> &'static str {
        match record_type {
            RecordType::Task => "tasks.csv",
            RecordType::Matter => "matters.csv",
            RecordType::Case => "cases.csv",
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Record>, RecordImportError> {
        parser::parse_records(reader)
    }

    /// Builds a store from `tasks.csv`, `matters.csv`, and `cases.csv`; missing files
    /// leave that record type empty.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<InMemoryRecordStore, RecordImportError> {
        let dir = dir.as_ref();
        let mut store = InMemoryRecordStore::new();

        for record_type in RecordType::ordered() {
            let path = dir.join(Self::file_name(record_type));
            if !path.is_file() {
                warn!(path = %path.display(), "record export missing; {} will report zero", record_type.plural());
                continue;
            }

            let records = Self::from_path(&path)?;
            info!(path = %path.display(), count = records.len(), "loaded {} export", record_type.label());
            store.extend(record_type, records);
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "Name,Status,Created At,Modified,Completed On,Date of Disposal\n";

    #[test]
    fn parse_datetime_supports_rfc3339_sql_and_date_strings() {
        let rfc = parser::parse_datetime("2024-03-04T10:00:00Z").expect("parse rfc");
        assert_eq!(
            rfc,
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );

        let sql = parser::parse_datetime("2024-03-04 08:15:30.123456").expect("parse sql");
        assert_eq!(sql.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        let date = parser::parse_datetime("2024-03-31").expect("parse date");
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2024, 3, 31)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        assert!(parser::parse_datetime("  ").is_none());
        assert!(parser::parse_datetime("yesterday").is_none());
    }

    #[test]
    fn blank_cells_become_none() {
        let csv = format!("{HEADER}TASK-0001,Open,2024-01-02 09:00:00,,,\n");
        let records = RecordImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "Open");
        assert!(records[0].modified.is_none());
        assert!(records[0].completed_on.is_none());
        assert!(records[0].date_of_disposal.is_none());
    }

    #[test]
    fn bad_timestamp_reports_line_and_column() {
        let csv = format!(
            "{HEADER}TASK-0001,Open,2024-01-02,,,\nTASK-0002,Completed,2024-01-03,,not-a-date,\n"
        );
        let error = RecordImporter::from_reader(Cursor::new(csv)).expect_err("expected failure");

        match error {
            RecordImportError::InvalidTimestamp { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Completed On");
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn missing_creation_is_rejected() {
        let csv = format!("{HEADER}CASE-0001,Open,,,,\n");
        let error = RecordImporter::from_reader(Cursor::new(csv)).expect_err("expected failure");
        assert!(matches!(error, RecordImportError::MissingCreation { line: 2 }));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = RecordImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            RecordImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn load_dir_skips_missing_exports() {
        let dir = std::env::temp_dir().join(format!("clearance-import-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        std::fs::write(
            dir.join("cases.csv"),
            format!("{HEADER}CASE-0001,Disposed,2024-01-02,,,2024-02-10\n"),
        )
        .expect("write export");

        let store = RecordImporter::load_dir(&dir).expect("load succeeds");
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(store.len(RecordType::Case), 1);
        assert_eq!(store.len(RecordType::Task), 0);
        assert!(store.records(RecordType::Case)[0].date_of_disposal.is_some());
    }
}
