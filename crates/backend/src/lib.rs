//! Backend abstractions for reading and writing embedded media tags.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod exiftool;
pub mod memory;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("could not invoke metadata tool: {0}")]
    Invocation(#[from] std::io::Error),
    #[error("metadata tool failed: {0}")]
    Tool(String),
    #[error("unreadable tag dump: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("metadata tool timed out after {0}s")]
    Timeout(u64),
}

/// The embedded tag fields this system reconciles. Everything else the
/// tool reports is ignored on read and left untouched on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "CreationDate", default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(rename = "ModifyDate", default, skip_serializing_if = "Option::is_none")]
    pub modify_date: Option<String>,
    #[serde(rename = "GPSLatitude", default, skip_serializing_if = "Option::is_none")]
    pub gps_latitude: Option<f64>,
    #[serde(rename = "GPSLongitude", default, skip_serializing_if = "Option::is_none")]
    pub gps_longitude: Option<f64>,
}

#[async_trait::async_trait]
pub trait MetadataBackend: Send + Sync {
    /// Read the current tag record embedded in `path`.
    async fn read_tags(&self, path: &Path) -> Result<TagRecord, BackendError>;

    /// Write the present fields of `update` into `path`.
    async fn write_tags(&self, path: &Path, update: &TagRecord) -> Result<(), BackendError>;
}
