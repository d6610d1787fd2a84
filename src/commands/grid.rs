use anyhow::{Context, Result};
use calpick_core::grid::MonthGrid;
use calpick_core::{CalendarAction, DateRange, PickerOptions, calendar_reducer};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

use super::localized_state;
use crate::render::Render;

pub fn run(locale: &str, month: Option<&str>, range: DateRange) -> Result<()> {
    let today = Local::now().date_naive();
    let options = PickerOptions {
        initial_date_range: (!range.is_empty()).then_some(range),
        ..Default::default()
    };

    let mut state = localized_state(&options, locale, today);
    if let Some(month) = month {
        let month = parse_month(month)?;
        state = calendar_reducer(&state, CalendarAction::SetCurrentMonth(month));
    }

    println!("{}", MonthGrid::build(&state, today).render());

    if let Some(days) = range.num_days() {
        println!();
        println!(
            "{}",
            format!("{} {}", days, if days == 1 { "day" } else { "days" }).dimmed()
        );
    }

    Ok(())
}

/// Parse "YYYY-MM" into the first day of that month.
fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", month))
}
