//! TUI rendering traits for calpick types.
//!
//! Extension traits that add colored terminal rendering to calpick-core
//! types using owo_colors.

use calpick_core::calendar_math::{format_date_time, month_name};
use calpick_core::event::CalendarEvent;
use calpick_core::grid::{DayMark, MonthGrid};
use calpick_core::state::{CalendarState, SelectionPhase};
use chrono::{Datelike, Local};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one day column, including the separating space
const CELL_WIDTH: usize = 3;

impl Render for MonthGrid {
    fn render(&self) -> String {
        let width = CELL_WIDTH * 7 - 1;
        let title = format!("{} {}", month_name(self.month), self.month.year());

        let mut lines = vec![format!("{:^width$}", title).bold().to_string()];

        let header: Vec<String> = self
            .weekdays
            .iter()
            .map(|label| format!("{:>2}", label.chars().take(2).collect::<String>()))
            .collect();
        lines.push(header.join(" ").dimmed().to_string());

        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|slot| match slot {
                    None => "  ".to_string(),
                    Some(cell) => {
                        let label = format!("{:>2}", cell.date.day());
                        match cell.mark {
                            DayMark::Single | DayMark::Start | DayMark::End => {
                                label.reversed().bold().to_string()
                            }
                            DayMark::InRange => label.green().to_string(),
                            DayMark::Today => label.cyan().underline().to_string(),
                            DayMark::Plain => label,
                        }
                    }
                })
                .collect();
            lines.push(cells.join(" "));
        }

        lines.join("\n")
    }
}

impl Render for CalendarState {
    fn render(&self) -> String {
        let start = format_date_time(self.date_range.start_date, &self.start_time);
        let end = format_date_time(self.date_range.end_date, &self.end_time);
        let next = match self.selection_phase {
            SelectionPhase::Start => "pick a start day",
            SelectionPhase::End => "pick an end day",
        };

        format!(
            "{} {}\n{} {}\n{}",
            "From:".dimmed(),
            start,
            "To:  ".dimmed(),
            end,
            format!("({})", next).dimmed()
        )
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let start = self.start.with_timezone(&Local);
        let end = self.end.with_timezone(&Local);

        let end_format = if start.date_naive() == end.date_naive() {
            "%H:%M"
        } else {
            "%b %-d %H:%M"
        };
        let when = format!(
            "{} - {}",
            start.format("%a %b %-d %H:%M"),
            end.format(end_format)
        );

        format!("{} {} {}", when, self.title.bold(), format!("[{}]", self.id).dimmed())
    }
}
