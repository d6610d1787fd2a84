//! Calendar events stored alongside the picker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalPickError, CalPickResult};

/// A stored calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Empty until the event is first saved
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// An unsaved event.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        CalendarEvent {
            id: String::new(),
            title: title.into(),
            start,
            end,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }

    /// Check the rules an event form enforces before saving.
    pub fn validate(&self) -> CalPickResult<()> {
        if self.title.trim().is_empty() {
            return Err(CalPickError::InvalidEvent("Title is required".into()));
        }
        if self.start >= self.end {
            return Err(CalPickError::InvalidEvent(
                "End time must be after start time".into(),
            ));
        }
        Ok(())
    }
}
