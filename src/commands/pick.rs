use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use calpick_core::calendar_math::{MONTH_NAMES, format_date_time};
use calpick_core::config::CalpickConfig;
use calpick_core::event::CalendarEvent;
use calpick_core::grid::MonthGrid;
use calpick_core::picker::DateTimePicker;
use calpick_core::pointer::{PickerPart, PointerBus, PointerDown};
use calpick_core::DateRange;
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use super::events;
use crate::render::Render;

/// What the session reported last through `onChange`.
#[derive(Debug, Clone)]
struct Selection {
    range: DateRange,
    start_time: String,
    end_time: String,
}

#[derive(Clone, Copy)]
enum MenuItem {
    PickDay,
    PrevMonth,
    NextMonth,
    ChooseMonth,
    ChooseYear,
    SetTimes,
    Done,
    Cancel,
}

const MENU: [(MenuItem, &str); 8] = [
    (MenuItem::PickDay, "Pick a day"),
    (MenuItem::PrevMonth, "Previous month"),
    (MenuItem::NextMonth, "Next month"),
    (MenuItem::ChooseMonth, "Choose month"),
    (MenuItem::ChooseYear, "Choose year"),
    (MenuItem::SetTimes, "Set times"),
    (MenuItem::Done, "Done"),
    (MenuItem::Cancel, "Cancel"),
];

pub async fn run(config: &CalpickConfig, locale: &str, range: DateRange) -> Result<()> {
    let Some(selection) = session(config, locale, range)? else {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    };

    let from = format_date_time(selection.range.start_date, &selection.start_time);
    let to = format_date_time(selection.range.end_date, &selection.end_time);
    println!("{}", format!("  Selected: {} - {}", from, to).green());

    let Some(start_date) = selection.range.start_date else {
        return Ok(());
    };

    let save = Confirm::new()
        .with_prompt("  Save as event?")
        .default(false)
        .interact()?;
    if !save {
        return Ok(());
    }

    let title: String = Input::new().with_prompt("  Title").interact_text()?;
    let end_date = selection.range.end_date.unwrap_or(start_date);
    let event = CalendarEvent::new(
        title,
        events::picked_datetime(start_date, &selection.start_time)?,
        events::picked_datetime(end_date, &selection.end_time)?,
    );

    events::save(&events::client(config), event).await
}

/// Drive a picker from terminal prompts until the user is done.
///
/// Prompts stand in for pointer presses: each one is announced on the bus
/// with the part of the picker it lands on before the picker handles it.
fn session(config: &CalpickConfig, locale: &str, range: DateRange) -> Result<Option<Selection>> {
    let mut options = config.picker_options();
    if !range.is_empty() {
        options.initial_date_range = Some(range);
    }

    let latest: Rc<RefCell<Option<Selection>>> = Rc::default();
    let sink = latest.clone();
    let picker = DateTimePicker::new(options).on_change(move |range, start_time, end_time| {
        tracing::debug!(?range, start_time, end_time, "Selection changed");
        *sink.borrow_mut() = Some(Selection {
            range: *range,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        });
    });

    let bus = PointerBus::new();
    let _activation = picker.activate(&bus, locale)?;
    let today = Local::now().date_naive();
    let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();

    loop {
        let state = picker.state();
        println!();
        println!("{}", MonthGrid::build(&state, today).render());
        println!();
        println!("{}", state.render());
        println!();

        let choice = Select::new()
            .with_prompt("  Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match MENU[choice].0 {
            MenuItem::PickDay => {
                let Some(date) = prompt_day(state.current_month)? else {
                    continue;
                };
                bus.pointer_down(&PointerDown::on([PickerPart::DayGrid, PickerPart::Picker]));
                picker.handle_date_select(date);
            }
            MenuItem::PrevMonth => {
                bus.pointer_down(&navigation_press());
                picker.prev_month();
            }
            MenuItem::NextMonth => {
                bus.pointer_down(&navigation_press());
                picker.next_month();
            }
            MenuItem::ChooseMonth => {
                bus.pointer_down(&PointerDown::on([
                    PickerPart::MonthSelectButton,
                    PickerPart::Picker,
                ]));
                picker.toggle_month_picker();

                let month = Select::new()
                    .with_prompt("  Month")
                    .items(&MONTH_NAMES)
                    .default(state.current_month.month0() as usize)
                    .interact()?;
                bus.pointer_down(&PointerDown::on([PickerPart::MonthPicker, PickerPart::Picker]));
                picker.set_month(month as i32);
            }
            MenuItem::ChooseYear => {
                bus.pointer_down(&PointerDown::on([
                    PickerPart::YearSelectButton,
                    PickerPart::Picker,
                ]));
                picker.toggle_year_picker();

                let years: Vec<i32> = picker.years().collect();
                let current = years
                    .iter()
                    .position(|y| *y == state.current_month.year())
                    .unwrap_or(years.len().saturating_sub(1));
                let index = Select::new()
                    .with_prompt("  Year")
                    .items(&years)
                    .default(current)
                    .max_length(12)
                    .interact()?;
                bus.pointer_down(&PointerDown::on([PickerPart::YearPicker, PickerPart::Picker]));
                picker.set_year(years[index]);
            }
            MenuItem::SetTimes => {
                bus.pointer_down(&PointerDown::on([PickerPart::TimePicker, PickerPart::Picker]));
                picker.toggle_time_picker();

                let start = prompt_time("  Start time", &state.start_time)?;
                picker.handle_start_time_change(&start);
                let end = prompt_time("  End time", &state.end_time)?;
                picker.handle_end_time_change(&end);

                picker.toggle_time_picker();
            }
            MenuItem::Done => break,
            MenuItem::Cancel => return Ok(None),
        }
    }

    Ok(latest.borrow().clone())
}

fn navigation_press() -> PointerDown {
    PointerDown::on([PickerPart::NavigationButton, PickerPart::Picker])
}

/// Ask for a day of the visible month. Empty input skips.
fn prompt_day(month: NaiveDate) -> Result<Option<NaiveDate>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Day")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(None);
        }

        match day_in_month(month, &input) {
            Some(date) => return Ok(Some(date)),
            None => eprintln!("  {}", format!("No day '{}' in this month", input.trim()).red()),
        }
    }
}

fn day_in_month(month: NaiveDate, input: &str) -> Option<NaiveDate> {
    let day: u32 = input.trim().parse().ok()?;
    month.with_day(day)
}

/// Ask for an "HH:MM" time, retrying on bad input.
fn prompt_time(prompt: &str, current: &str) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(current.to_string())
            .interact_text()?;

        match NaiveTime::parse_from_str(input.trim(), "%H:%M") {
            Ok(time) => return Ok(time.format("%H:%M").to_string()),
            Err(_) => eprintln!("  {}", format!("Invalid time '{}'. Expected HH:MM", input).red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_in_month_bounds() {
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            day_in_month(feb, " 29 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(day_in_month(feb, "30"), None);
        assert_eq!(day_in_month(feb, "0"), None);
        assert_eq!(day_in_month(feb, "x"), None);
    }
}
