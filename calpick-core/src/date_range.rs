//! Date range selected in the picker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A possibly incomplete range of calendar days.
///
/// `end_date` is only ever set together with `start_date`. Once both are set
/// by the picker's own selection logic, `start_date <= end_date`. Ranges handed
/// in by callers are taken as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Range with only the start pinned.
    pub fn starting(date: NaiveDate) -> Self {
        DateRange {
            start_date: Some(date),
            end_date: None,
        }
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    /// Parse optional YYYY-MM-DD arguments into a range.
    /// An end without a start, or before it, is rejected.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let start_date = from.map(parse_day).transpose()?;
        let end_date = to.map(parse_day).transpose()?;

        if start_date.is_none() && end_date.is_some() {
            return Err("An end date needs a start date (--from)".to_string());
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(format!("End date {} is before start date {}", end, start));
            }
        }

        Ok(DateRange {
            start_date,
            end_date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn is_start(&self, date: NaiveDate) -> bool {
        self.start_date == Some(date)
    }

    pub fn is_end(&self, date: NaiveDate) -> bool {
        self.end_date == Some(date)
    }

    /// Strictly between the two endpoints (endpoints themselves excluded).
    pub fn is_within(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start < date && date < end,
            _ => false,
        }
    }

    /// Number of days covered, counting both endpoints.
    pub fn num_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}
