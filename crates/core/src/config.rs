use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Sidecar directory name, resolved inside the photos directory.
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,
    /// Extensions treated as media, matched case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            metadata_dir: default_metadata_dir(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_exiftool")]
    pub exiftool: String,
    /// Per-invocation timeout in seconds; unbounded when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            exiftool: default_exiftool(),
            timeout_secs: None,
        }
    }
}

fn default_metadata_dir() -> String {
    "metadata".to_string()
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "mp4", "mov"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_exiftool() -> String {
    "exiftool".to_string()
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
