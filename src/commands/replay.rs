use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use calpick_core::{CalendarAction, CalendarState, PickerOptions, calendar_reducer};
use chrono::Local;

use super::localized_state;

pub fn run(locale: &str, file: &Path) -> Result<()> {
    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read actions from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Could not read {}", file.display()))?
    };

    let actions: Vec<CalendarAction> =
        serde_json::from_str(&content).context("Could not parse actions")?;

    let initial = localized_state(&PickerOptions::default(), locale, Local::now().date_naive());
    let state = replay(initial, actions);

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Run every action through the reducer, in order.
fn replay(initial: CalendarState, actions: Vec<CalendarAction>) -> CalendarState {
    actions.into_iter().fold(initial, |state, action| {
        if action == CalendarAction::Unknown {
            tracing::warn!("Ignoring unknown action");
        }
        calendar_reducer(&state, action)
    })
}
