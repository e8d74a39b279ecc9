use super::RecordImportError;
use crate::store::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, RecordImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<RecordRow>().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line = index + 2;
        records.push(row?.into_record(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RecordRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Created At", default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(rename = "Modified", default, deserialize_with = "empty_string_as_none")]
    modified: Option<String>,
    #[serde(rename = "Completed On", default, deserialize_with = "empty_string_as_none")]
    completed_on: Option<String>,
    #[serde(
        rename = "Date of Disposal",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date_of_disposal: Option<String>,
}

impl RecordRow {
    fn into_record(self, line: usize) -> Result<Record, RecordImportError> {
        let creation = optional_timestamp(line, "Created At", self.created_at)?
            .ok_or(RecordImportError::MissingCreation { line })?;

        Ok(Record {
            name: self.name,
            status: self.status,
            creation,
            modified: optional_timestamp(line, "Modified", self.modified)?,
            completed_on: optional_timestamp(line, "Completed On", self.completed_on)?,
            date_of_disposal: optional_timestamp(line, "Date of Disposal", self.date_of_disposal)?,
        })
    }
}

fn optional_timestamp(
    line: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, RecordImportError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or(RecordImportError::InvalidTimestamp { line, column, value: raw }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
