use super::domain::{DateSelection, Periodicity, RecordType};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// How many years either side of the current one the year picker offers.
const YEAR_SPAN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterKind {
    Select,
    Date,
}

/// One input of the report filter form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDefinition {
    pub fieldname: &'static str,
    pub label: &'static str,
    pub fieldtype: FilterKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub reqd: bool,
}

impl FilterDefinition {
    fn select(
        fieldname: &'static str,
        label: &'static str,
        options: Vec<String>,
        default: String,
    ) -> Self {
        Self {
            fieldname,
            label,
            fieldtype: FilterKind::Select,
            options,
            default: Some(default),
            reqd: true,
        }
    }

    fn date(fieldname: &'static str, label: &'static str, default: NaiveDate) -> Self {
        Self {
            fieldname,
            label,
            fieldtype: FilterKind::Date,
            options: Vec::new(),
            default: Some(default.format("%Y-%m-%d").to_string()),
            reqd: true,
        }
    }
}

/// Filter form for the clearance report, with defaults relative to `today`.
pub fn definitions(today: NaiveDate) -> Vec<FilterDefinition> {
    let year = today.year();
    let month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);

    vec![
        FilterDefinition::select(
            "report_type",
            "Report Type",
            RecordType::ordered()
                .iter()
                .map(|kind| kind.label().to_string())
                .collect(),
            RecordType::Task.label().to_string(),
        ),
        FilterDefinition::select(
            "fiscal_or_date",
            "Fiscal Year/Date Range",
            [DateSelection::FiscalYear, DateSelection::DateRange]
                .iter()
                .map(|selection| selection.label().to_string())
                .collect(),
            DateSelection::default().label().to_string(),
        ),
        FilterDefinition::select(
            "year",
            "Year",
            (year - YEAR_SPAN..=year + YEAR_SPAN)
                .map(|option| option.to_string())
                .collect(),
            year.to_string(),
        ),
        FilterDefinition::select(
            "periodicity",
            "Periodicity",
            Periodicity::ordered()
                .iter()
                .map(|periodicity| periodicity.label().to_string())
                .collect(),
            Periodicity::default().label().to_string(),
        ),
        FilterDefinition::date("from_date", "From Date", month_ago),
        FilterDefinition::date("to_date", "To Date", today),
    ]
}
