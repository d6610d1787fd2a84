use uuid::Uuid;

use super::EventStore;
use crate::event::CalendarEvent;

/// Front for an [`EventStore`] that never fails.
///
/// Store errors are logged and reported as empty results, `None` or `false`.
pub struct EventClient<S> {
    store: S,
}

impl<S: EventStore> EventClient<S> {
    pub fn new(store: S) -> Self {
        EventClient { store }
    }

    pub async fn get_events(&self) -> Vec<CalendarEvent> {
        self.store.get_all().await.unwrap_or_else(|e| {
            tracing::error!("Error getting events: {}", e);
            Vec::new()
        })
    }

    /// Store `event`, giving it a fresh id if it has none. Returns the id.
    pub async fn save_event(&self, event: &CalendarEvent) -> Option<String> {
        let mut event = event.clone();
        if event.id.is_empty() {
            event.id = Uuid::new_v4().to_string();
        }

        match self.store.put(&event).await {
            Ok(()) => Some(event.id),
            Err(e) => {
                tracing::error!("Error saving event: {}", e);
                None
            }
        }
    }

    pub async fn remove_event(&self, id: &str) -> bool {
        match self.store.delete(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error removing event {}: {}", id, e);
                false
            }
        }
    }

    pub async fn get_event_by_id(&self, id: &str) -> Option<CalendarEvent> {
        self.store.get(id).await.unwrap_or_else(|e| {
            tracing::error!("Error getting event {}: {}", id, e);
            None
        })
    }
}
