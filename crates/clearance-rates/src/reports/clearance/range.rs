use super::domain::{ClearanceError, DateSelection};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Inclusive calendar window `[from, to]` the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
    #[serde(skip)]
    end_exclusive: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ClearanceError> {
        if from > to {
            return Err(ClearanceError::InvalidDateRange);
        }
        let end_exclusive = to.succ_opt().ok_or(ClearanceError::InvalidDateRange)?;
        Ok(Self {
            from,
            to,
            end_exclusive,
        })
    }

    /// January 1 through December 31 of `year`.
    pub fn fiscal_year(year: i32) -> Result<Self, ClearanceError> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ClearanceError::InvalidDateRange)?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(ClearanceError::InvalidDateRange)?;
        Self::new(from, to)
    }

    /// Resolves the window from raw filter values.
    pub fn resolve(
        selection: DateSelection,
        year: Option<&str>,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Self, ClearanceError> {
        match selection {
            DateSelection::FiscalYear => {
                let year = year
                    .map(str::trim)
                    .and_then(|value| value.parse::<i32>().ok())
                    .ok_or(ClearanceError::InvalidDateRange)?;
                Self::fiscal_year(year)
            }
            DateSelection::DateRange => {
                let from = from_date
                    .and_then(parse_filter_date)
                    .ok_or(ClearanceError::InvalidDateRange)?;
                let to = to_date
                    .and_then(parse_filter_date)
                    .ok_or(ClearanceError::InvalidDateRange)?;
                Self::new(from, to)
            }
        }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Day after `to`; timestamps on the last day fall strictly before it.
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end_exclusive
    }

    pub fn start_bound(&self) -> NaiveDateTime {
        self.from.and_time(chrono::NaiveTime::MIN)
    }

    pub fn end_bound(&self) -> NaiveDateTime {
        self.end_exclusive.and_time(chrono::NaiveTime::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    pub fn num_days(&self) -> i64 {
        (self.end_exclusive - self.from).num_days()
    }
}

/// Accepts `YYYY-MM-DD` and datetime strings whose date part is `YYYY-MM-DD`.
pub fn parse_filter_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}
