//! The picker state machine.

use chrono::{Datelike, NaiveDate};

use crate::action::CalendarAction;
use crate::calendar_math::{month_from_index, shift_month};
use crate::date_range::DateRange;
use crate::state::{CalendarState, SelectionPhase};

/// Apply one action, returning the next state.
///
/// Total and pure: every action yields a state, and the input is left as is.
/// Navigation that would leave the representable calendar keeps the current
/// month.
pub fn calendar_reducer(state: &CalendarState, action: CalendarAction) -> CalendarState {
    let mut next = state.clone();

    match action {
        CalendarAction::SetDateRange(range) => next.date_range = range,
        CalendarAction::SetStartTime(time) => next.start_time = time,
        CalendarAction::SetEndTime(time) => next.end_time = time,
        CalendarAction::SetCurrentMonth(date) => next.current_month = date,
        CalendarAction::SetSelectionPhase(phase) => next.selection_phase = phase,
        CalendarAction::ToggleTimePicker => next.is_time_picker_open = !state.is_time_picker_open,
        CalendarAction::ToggleMonthPicker => {
            next.is_month_picker_open = !state.is_month_picker_open;
            next.is_year_picker_open = false;
        }
        CalendarAction::ToggleYearPicker => {
            next.is_year_picker_open = !state.is_year_picker_open;
            next.is_month_picker_open = false;
        }
        CalendarAction::CloseAllPickers => {
            next.is_month_picker_open = false;
            next.is_year_picker_open = false;
        }
        CalendarAction::SetLocaleSettings(settings) => {
            next.first_day_of_week = settings.first_day_of_week;
            next.weekdays = settings.weekdays;
        }
        CalendarAction::SelectDate(date) => {
            let (range, phase) = select_date(state, date);
            next.date_range = range;
            next.selection_phase = phase;
        }
        CalendarAction::PrevMonth => {
            next.current_month = shift_month(state.current_month, -1).unwrap_or(state.current_month);
        }
        CalendarAction::NextMonth => {
            next.current_month = shift_month(state.current_month, 1).unwrap_or(state.current_month);
        }
        CalendarAction::SetMonth(index) => {
            next.current_month =
                month_from_index(state.current_month.year(), index).unwrap_or(state.current_month);
            next.is_month_picker_open = false;
        }
        CalendarAction::SetYear(year) => {
            next.current_month = NaiveDate::from_ymd_opt(year, state.current_month.month(), 1)
                .unwrap_or(state.current_month);
            next.is_year_picker_open = false;
        }
        CalendarAction::Unknown => {}
    }

    next
}

/// Two clicks make a range. A second click before the pinned start
/// re-anchors the range on the earlier day instead of completing it.
fn select_date(state: &CalendarState, date: NaiveDate) -> (DateRange, SelectionPhase) {
    match state.selection_phase {
        SelectionPhase::Start => (DateRange::starting(date), SelectionPhase::End),
        SelectionPhase::End => match state.date_range.start_date {
            Some(start) if date < start => (DateRange::starting(date), SelectionPhase::End),
            start_date => (
                DateRange {
                    start_date,
                    end_date: Some(date),
                },
                SelectionPhase::Start,
            ),
        },
    }
}
