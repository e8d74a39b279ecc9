use super::domain::Periodicity;
use super::range::DateRange;
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One reporting bucket, inclusive of both `start` and `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl Period {
    fn new(start: NaiveDate, end: NaiveDate, periodicity: Periodicity) -> Self {
        Self {
            start,
            end,
            label: period_label(start, end, periodicity),
        }
    }

    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Midnight after `end`, so the whole last day falls inside the period.
    pub fn end_bound(&self) -> NaiveDateTime {
        let next = self.end.succ_opt().unwrap_or(self.end);
        next.and_time(NaiveTime::MIN)
    }
}

/// Splits `range` into consecutive periods ordered by start date.
pub fn segment(range: &DateRange, periodicity: Periodicity) -> Vec<Period> {
    let Some(step) = periodicity.step_months() else {
        return vec![Period::new(range.from(), range.to(), periodicity)];
    };

    let mut periods = Vec::new();
    let mut start = range.from();

    while start <= range.to() {
        let end = start
            .checked_add_months(Months::new(step))
            .and_then(|next| next.pred_opt())
            .map_or(range.to(), |end| end.min(range.to()));
        periods.push(Period::new(start, end, periodicity));

        match end.succ_opt() {
            Some(next) => start = next,
            None => break,
        }
    }

    periods
}

pub fn period_label(start: NaiveDate, end: NaiveDate, periodicity: Periodicity) -> String {
    match periodicity {
        Periodicity::Monthly => start.format("%b %Y").to_string(),
        _ => format!("{} - {}", start.format("%b %Y"), end.format("%b %Y")),
    }
}
