use crate::{BackendError, MetadataBackend, TagRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// In-memory backend for tests: reads come from a seeded map, writes
/// merge into it and are recorded in call order.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<PathBuf, TagRecord>>,
    writes: Mutex<Vec<(PathBuf, TagRecord)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tags a later `read_tags` will return for `path`.
    pub async fn insert(&self, path: impl Into<PathBuf>, record: TagRecord) {
        self.records.lock().await.insert(path.into(), record);
    }

    pub async fn record(&self, path: &Path) -> Option<TagRecord> {
        self.records.lock().await.get(path).cloned()
    }

    pub async fn writes(&self) -> Vec<(PathBuf, TagRecord)> {
        self.writes.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl MetadataBackend for MemoryBackend {
    async fn read_tags(&self, path: &Path) -> Result<TagRecord, BackendError> {
        let records = self.records.lock().await;
        Ok(records.get(path).cloned().unwrap_or_default())
    }

    async fn write_tags(&self, path: &Path, update: &TagRecord) -> Result<(), BackendError> {
        let mut records = self.records.lock().await;
        let stored = records.entry(path.to_path_buf()).or_default();
        if let Some(title) = &update.title {
            stored.title = Some(title.clone());
        }
        if let Some(creation) = &update.creation_date {
            stored.creation_date = Some(creation.clone());
        }
        if let Some(modify) = &update.modify_date {
            stored.modify_date = Some(modify.clone());
        }
        if let Some(lat) = update.gps_latitude {
            stored.gps_latitude = Some(lat);
        }
        if let Some(lon) = update.gps_longitude {
            stored.gps_longitude = Some(lon);
        }
        drop(records);
        self.writes
            .lock()
            .await
            .push((path.to_path_buf(), update.clone()));
        Ok(())
    }
}
