use crate::infra::{load_store, parse_date};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use clearance_rates::error::AppError;
use clearance_rates::reports::clearance::{
    ClearanceReport, ClearanceReportRequest, ClearanceReportService, DateSelection,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Record type to report on (Task, Matter, or Case)
    #[arg(long, default_value = "Task")]
    pub(crate) report_type: String,
    /// Bucket size (Monthly, Quarterly, Half-Yearly, or Yearly)
    #[arg(long, default_value = "Monthly")]
    pub(crate) periodicity: String,
    /// Report on January 1 through December 31 of this year
    #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
    pub(crate) fiscal_year: Option<i32>,
    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from_date: Option<NaiveDate>,
    /// Last day of the reporting window, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to_date: Option<NaiveDate>,
    /// Directory holding tasks.csv, matters.csv, and cases.csv
    #[arg(long)]
    pub(crate) data_dir: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

impl ReportArgs {
    pub(crate) fn to_request(&self) -> ClearanceReportRequest {
        let selection = if self.fiscal_year.is_some() {
            DateSelection::FiscalYear
        } else {
            DateSelection::DateRange
        };

        ClearanceReportRequest {
            report_type: Some(self.report_type.clone()),
            periodicity: Some(self.periodicity.clone()),
            fiscal_or_date: Some(selection.label().to_string()),
            year: self.fiscal_year.map(|year| year.to_string()),
            from_date: self.from_date.map(|date| date.to_string()),
            to_date: self.to_date.map(|date| date.to_string()),
        }
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let store = load_store(Some(&args.data_dir))?;
    let service = ClearanceReportService::new(Arc::new(store));
    let report = service.execute(&args.to_request())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => render_table(&report, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => report.write_csv(&mut out)?,
    }

    Ok(())
}

pub(crate) fn render_table<W: Write>(report: &ClearanceReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", report.message)?;
    writeln!(
        out,
        "Window: {} -> {} ({})",
        report.range.from(),
        report.range.to(),
        report.periodicity.label()
    )?;

    if report.rows.is_empty() {
        writeln!(out, "\nNo periods in range")?;
        return Ok(());
    }

    let labels: Vec<&str> = report.columns.iter().map(|column| column.label).collect();
    let period_width = report
        .rows
        .iter()
        .map(|row| row.period.len())
        .chain(std::iter::once(labels[0].len()))
        .max()
        .unwrap_or_default();

    writeln!(
        out,
        "\n{:<period_width$}  {:>25}  {:>9}  {:>18}",
        labels[0], labels[1], labels[2], labels[3]
    )?;
    for row in &report.rows {
        writeln!(
            out,
            "{:<period_width$}  {:>25}  {:>9}  {:>17.2}%",
            row.period, row.total, row.completed, row.clearance_rate
        )?;
    }

    let (total, completed) = report.totals();
    writeln!(
        out,
        "\nAcross all periods: {completed} completed against {total} in scope"
    )?;

    Ok(())
}
