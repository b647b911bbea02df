//! JSON sidecar descriptors exported alongside each media file.

use anyhow::Context;
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// The sidecar fields this system consumes; anything else in the
/// descriptor is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarMetadata {
    #[serde(default)]
    pub title: Option<String>,
    pub creation_time: TimestampEntry,
    pub modification_time: TimestampEntry,
    #[serde(default)]
    pub geo_data: GeoData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimestampEntry {
    pub formatted: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoData {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Sidecar path for a media file: `<dir>/<filename>.json`, keyed on the
/// full filename including its extension.
pub fn path_for(media: &Path, metadata_dir: &Path) -> PathBuf {
    let mut name = media.file_name().map(OsString::from).unwrap_or_default();
    name.push(".json");
    metadata_dir.join(name)
}

pub fn read(path: &Path) -> anyhow::Result<SidecarMetadata> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sidecar {:?}", path))?;
    let meta: SidecarMetadata = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse sidecar {:?}", path))?;
    Ok(meta)
}
