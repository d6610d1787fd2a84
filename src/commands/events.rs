use anyhow::{Context, Result};
use calpick_core::config::CalpickConfig;
use calpick_core::event::CalendarEvent;
use calpick_core::store::{EventClient, EventStore, FileStore};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn client(config: &CalpickConfig) -> EventClient<FileStore> {
    EventClient::new(FileStore::new(config.data_path()))
}

pub async fn list<S: EventStore>(client: &EventClient<S>) -> Result<()> {
    let events = client.get_events().await;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}

pub async fn add<S: EventStore>(
    client: &EventClient<S>,
    title: String,
    start: &str,
    end: &str,
    description: Option<String>,
) -> Result<()> {
    let mut event = CalendarEvent::new(title, parse_datetime(start)?, parse_datetime(end)?);
    if let Some(description) = description {
        event = event.with_description(description);
    }

    save(client, event).await
}

/// Changes requested for a saved event. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct EventEdit {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
}

pub async fn edit<S: EventStore>(client: &EventClient<S>, id: &str, changes: EventEdit) -> Result<()> {
    let Some(event) = client.get_event_by_id(id).await else {
        anyhow::bail!("Event '{}' not found", id);
    };

    save(client, apply_edit(event, changes)?).await
}

fn apply_edit(mut event: CalendarEvent, changes: EventEdit) -> Result<CalendarEvent> {
    if let Some(title) = changes.title {
        event.title = title;
    }
    if let Some(start) = changes.start {
        event.start = parse_datetime(&start)?;
    }
    if let Some(end) = changes.end {
        event.end = parse_datetime(&end)?;
    }
    if let Some(description) = changes.description {
        event = event.with_description(description);
    }
    Ok(event)
}

/// Validate and store an event, reporting the result.
pub async fn save<S: EventStore>(client: &EventClient<S>, event: CalendarEvent) -> Result<()> {
    event.validate()?;

    let Some(id) = client.save_event(&event).await else {
        anyhow::bail!("Could not save event '{}'", event.title);
    };

    let verb = if event.is_saved() { "Updated" } else { "Created" };
    println!("{}", format!("  {}: {} [{}]", verb, event.title, id).green());
    Ok(())
}

pub async fn show<S: EventStore>(client: &EventClient<S>, id: &str) -> Result<()> {
    let Some(event) = client.get_event_by_id(id).await else {
        anyhow::bail!("Event '{}' not found", id);
    };

    println!("{}", event.render());
    if let Some(description) = &event.description {
        println!();
        println!("  {}", description);
    }

    Ok(())
}

pub async fn delete<S: EventStore>(client: &EventClient<S>, id: &str) -> Result<()> {
    let Some(event) = client.get_event_by_id(id).await else {
        anyhow::bail!("Event '{}' not found", id);
    };

    if !client.remove_event(id).await {
        anyhow::bail!("Could not delete event '{}'", event.title);
    }

    println!("{}", format!("  Deleted: {}", event.title).red());
    Ok(())
}

/// Parse an RFC 3339 timestamp or a local "YYYY-MM-DDTHH:MM" / "YYYY-MM-DD HH:MM".
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .with_context(|| {
            format!(
                "Invalid date/time '{}'. Expected YYYY-MM-DDTHH:MM or RFC 3339",
                input
            )
        })?;

    local_to_utc(naive)
}

/// A picked day and "HH:MM" time as a UTC instant.
pub fn picked_datetime(date: NaiveDate, time: &str) -> Result<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .with_context(|| format!("Invalid time '{}'. Expected HH:MM", time))?;

    local_to_utc(date.and_time(time))
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    let local = naive
        .and_local_timezone(Local)
        .earliest()
        .with_context(|| format!("{} does not exist in the local time zone", naive))?;

    Ok(local.with_timezone(&Utc))
}
