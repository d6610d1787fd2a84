//! Picker state and its initial constructor.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";

/// Which endpoint the next day click sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    #[default]
    Start,
    End,
}

/// Everything the picker shows.
///
/// Replaced wholesale by [`crate::reducer::calendar_reducer`], never
/// mutated in place by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarState {
    pub date_range: DateRange,
    /// "HH:MM", 24-hour
    pub start_time: String,
    /// "HH:MM", 24-hour
    pub end_time: String,
    /// Any day in the visible month; only year and month matter.
    pub current_month: NaiveDate,
    pub selection_phase: SelectionPhase,
    pub is_time_picker_open: bool,
    /// Never true together with `is_year_picker_open`.
    pub is_month_picker_open: bool,
    pub is_year_picker_open: bool,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    /// Seven short labels starting at `first_day_of_week`; empty until the
    /// host has resolved the locale.
    pub weekdays: Vec<String>,
}

/// Caller-supplied starting values.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    pub initial_date_range: Option<DateRange>,
    pub initial_start_time: Option<String>,
    pub initial_end_time: Option<String>,
}

impl CalendarState {
    /// Initial state from caller options. The visible month is the initial
    /// start date when there is one, today otherwise.
    pub fn new(options: &PickerOptions) -> Self {
        Self::new_at(options, Local::now().date_naive())
    }

    /// Like [`CalendarState::new`] with an explicit "today".
    pub fn new_at(options: &PickerOptions, today: NaiveDate) -> Self {
        let date_range = options.initial_date_range.unwrap_or_default();
        let current_month = date_range.start_date.unwrap_or(today);

        CalendarState {
            date_range,
            start_time: options
                .initial_start_time
                .clone()
                .unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
            end_time: options
                .initial_end_time
                .clone()
                .unwrap_or_else(|| DEFAULT_END_TIME.to_string()),
            current_month,
            selection_phase: SelectionPhase::Start,
            is_time_picker_open: false,
            is_month_picker_open: false,
            is_year_picker_open: false,
            first_day_of_week: 0,
            weekdays: Vec::new(),
        }
    }

    /// The three values reported to `onChange`.
    pub fn selection(&self) -> (&DateRange, &str, &str) {
        (&self.date_range, &self.start_time, &self.end_time)
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(&PickerOptions::default())
    }
}
