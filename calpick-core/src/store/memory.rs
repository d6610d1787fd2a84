use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{EventStore, sort_by_start};
use crate::error::{CalPickError, CalPickResult};
use crate::event::CalendarEvent;

/// Events kept in memory for the lifetime of the store.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<HashMap<String, CalendarEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn get_all(&self) -> CalPickResult<Vec<CalendarEvent>> {
        let mut events: Vec<_> = self.events.lock().await.values().cloned().collect();
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn get(&self, id: &str) -> CalPickResult<Option<CalendarEvent>> {
        Ok(self.events.lock().await.get(id).cloned())
    }

    async fn put(&self, event: &CalendarEvent) -> CalPickResult<()> {
        if event.id.is_empty() {
            return Err(CalPickError::Storage("Cannot store an event without an id".into()));
        }
        self.events
            .lock()
            .await
            .insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CalPickResult<()> {
        self.events.lock().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, day: u32) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            ..CalendarEvent::new(
                format!("Event {id}"),
                Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            )
        }
    }

    #[tokio::test]
    async fn put_get_delete() {
        let store = MemoryStore::new();
        store.put(&event("a", 2)).await.unwrap();
        store.put(&event("b", 1)).await.unwrap();

        let all = store.get_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);

        assert_eq!(store.get("a").await.unwrap(), Some(event("a", 2)));

        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_existing() {
        let store = MemoryStore::new();
        store.put(&event("a", 2)).await.unwrap();

        let mut renamed = event("a", 2);
        renamed.title = "Renamed".into();
        store.put(&renamed).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Renamed");
    }

    #[tokio::test]
    async fn rejects_missing_id() {
        let store = MemoryStore::new();
        assert!(store.put(&event("", 1)).await.is_err());
    }
}
