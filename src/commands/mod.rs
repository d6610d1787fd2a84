pub mod config;
pub mod events;
pub mod grid;
pub mod pick;
pub mod replay;

use calpick_core::locale::LocaleSettings;
use calpick_core::{CalendarAction, CalendarState, PickerOptions, calendar_reducer};
use chrono::NaiveDate;

/// Initial picker state with the week layout of `locale` applied.
pub fn localized_state(options: &PickerOptions, locale: &str, today: NaiveDate) -> CalendarState {
    let state = CalendarState::new_at(options, today);
    calendar_reducer(
        &state,
        CalendarAction::SetLocaleSettings(LocaleSettings::for_locale(locale)),
    )
}
