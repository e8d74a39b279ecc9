use super::chart::ChartSpec;
use super::domain::{Periodicity, RecordType};
use super::range::DateRange;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Data,
    Int,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub fieldname: &'static str,
    pub label: &'static str,
    pub fieldtype: ColumnKind,
    pub width: u16,
}

/// The fixed four-column layout every clearance report uses.
pub fn columns() -> Vec<ReportColumn> {
    vec![
        ReportColumn {
            fieldname: "period",
            label: "Period",
            fieldtype: ColumnKind::Data,
            width: 150,
        },
        ReportColumn {
            fieldname: "total",
            label: "Total (Pending + Created)",
            fieldtype: ColumnKind::Int,
            width: 150,
        },
        ReportColumn {
            fieldname: "completed",
            label: "Completed",
            fieldtype: ColumnKind::Int,
            width: 100,
        },
        ReportColumn {
            fieldname: "clearance_rate",
            label: "Clearance Rate (%)",
            fieldtype: ColumnKind::Percent,
            width: 150,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearanceRow {
    pub period: String,
    pub total: u64,
    pub completed: u64,
    pub clearance_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearanceReport {
    pub report_type: RecordType,
    pub periodicity: Periodicity,
    pub range: DateRange,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ClearanceRow>,
    pub message: String,
    pub chart: ChartSpec,
}

impl ClearanceReport {
    /// Writes the rows as CSV with the column labels as header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns.iter().map(|column| column.label))?;

        for row in &self.rows {
            csv_writer.write_record([
                row.period.clone(),
                row.total.to_string(),
                row.completed.to_string(),
                format!("{:.2}", row.clearance_rate),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn totals(&self) -> (u64, u64) {
        self.rows.iter().fold((0, 0), |(total, completed), row| {
            (total + row.total, completed + row.completed)
        })
    }
}
