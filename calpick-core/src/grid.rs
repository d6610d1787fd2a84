//! Month grid derived from picker state, for renderers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar_math::{days_in_month, first_day_of_month, month_start};
use crate::state::CalendarState;

/// How a day cell relates to the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    /// Start and end are the same day
    Single,
    Start,
    End,
    InRange,
    Today,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub mark: DayMark,
}

/// The visible month laid out in rows of seven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub weekdays: Vec<String>,
    /// Blank cells before day 1
    pub leading_blanks: u8,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(state: &CalendarState, today: NaiveDate) -> Self {
        let month = month_start(state.current_month);
        let range = &state.date_range;

        let days = month
            .iter_days()
            .take(days_in_month(month) as usize)
            .map(|date| {
                let mark = match (range.is_start(date), range.is_end(date)) {
                    (true, true) => DayMark::Single,
                    (true, false) => DayMark::Start,
                    (false, true) => DayMark::End,
                    _ if range.is_within(date) => DayMark::InRange,
                    _ if date == today => DayMark::Today,
                    _ => DayMark::Plain,
                };
                DayCell { date, mark }
            })
            .collect();

        MonthGrid {
            month,
            weekdays: state.weekdays.clone(),
            leading_blanks: first_day_of_month(month, state.first_day_of_week),
            days,
        }
    }

    /// Rows of seven slots; `None` is a blank cell.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let slots: Vec<Option<&DayCell>> = std::iter::repeat_n(None, self.leading_blanks as usize)
            .chain(self.days.iter().map(Some))
            .collect();

        slots
            .chunks(7)
            .map(|week| {
                let mut week = week.to_vec();
                week.resize(7, None);
                week
            })
            .collect()
    }
}
