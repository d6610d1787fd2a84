use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{EventStore, sort_by_start};
use crate::error::{CalPickError, CalPickResult};
use crate::event::CalendarEvent;

/// One `<id>.json` file per event inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn event_path(&self, id: &str) -> CalPickResult<PathBuf> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.starts_with('.');
        if !valid {
            return Err(CalPickError::Storage(format!("Invalid event id '{}'", id)));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    async fn read_event(path: &Path) -> CalPickResult<CalendarEvent> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl EventStore for FileStore {
    async fn get_all(&self) -> CalPickResult<Vec<CalendarEvent>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut events = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match Self::read_event(&path).await {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!("Skipping unreadable event file {}: {}", path.display(), e),
            }
        }

        sort_by_start(&mut events);
        Ok(events)
    }

    async fn get(&self, id: &str) -> CalPickResult<Option<CalendarEvent>> {
        let path = self.event_path(id)?;
        match Self::read_event(&path).await {
            Ok(event) => Ok(Some(event)),
            Err(CalPickError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn put(&self, event: &CalendarEvent) -> CalPickResult<()> {
        let path = self.event_path(&event.id)?;
        fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(event)?;
        fs::write(&path, content).await?;
        tracing::debug!("Stored event {} at {}", event.id, path.display());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CalPickResult<()> {
        let path = self.event_path(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
