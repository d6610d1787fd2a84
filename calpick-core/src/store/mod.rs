//! Keyed event storage.
//!
//! [`EventStore`] is the persistence seam: a file-backed store for the CLI,
//! an in-memory one for tests and previews. [`EventClient`] wraps any store
//! and turns failures into log lines and empty results.

mod client;
mod file;
mod memory;

pub use client::EventClient;
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::CalPickResult;
use crate::event::CalendarEvent;

/// Asynchronous key/value store of events, keyed by event id.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every stored event, ordered by start time.
    async fn get_all(&self) -> CalPickResult<Vec<CalendarEvent>>;

    async fn get(&self, id: &str) -> CalPickResult<Option<CalendarEvent>>;

    /// Insert or replace the event stored under `event.id`.
    async fn put(&self, event: &CalendarEvent) -> CalPickResult<()>;

    /// Removing an id that is not stored succeeds.
    async fn delete(&self, id: &str) -> CalPickResult<()>;
}

fn sort_by_start(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}
