use crate::{BackendError, MetadataBackend, TagRecord};
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Adapter that shells out to `exiftool` for tag reads and writes.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: String,
    timeout: Option<Duration>,
}

impl ExifTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Bound each tool invocation; unbounded when `None`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: &[String], path: &Path) -> Result<Output, BackendError> {
        let mut cmd = Command::new(&self.program);
        // A timed-out invocation must not leave the tool running.
        cmd.args(args).arg(path).kill_on_drop(true);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| BackendError::Timeout(limit.as_secs()))?
                .map_err(BackendError::from),
            None => cmd.output().await.map_err(BackendError::from),
        }
    }
}

#[async_trait::async_trait]
impl MetadataBackend for ExifTool {
    async fn read_tags(&self, path: &Path) -> Result<TagRecord, BackendError> {
        // -j dumps tags as a JSON array, -n keeps GPS numeric.
        let output = self
            .run(&["-j".to_string(), "-n".to_string()], path)
            .await?;
        if !output.status.success() {
            return Err(BackendError::Tool(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        parse_dump(&output.stdout)
    }

    async fn write_tags(&self, path: &Path, update: &TagRecord) -> Result<(), BackendError> {
        let output = self.run(&update_args(update), path).await?;
        // The tool's exit status is not consulted; files it could not
        // rewrite are picked up again on the next pass.
        if !output.status.success() {
            debug!(
                "metadata tool reported write errors for {:?}: {}",
                path,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Parse a `-j` dump for a single file: a one-element JSON array.
fn parse_dump(stdout: &[u8]) -> Result<TagRecord, BackendError> {
    let records: Vec<TagRecord> = serde_json::from_slice(stdout)?;
    records
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Tool("empty tag dump".to_string()))
}

/// Map the present fields of an update onto `-Tag=value` arguments.
fn update_args(update: &TagRecord) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(title) = &update.title {
        args.push(format!("-Title={}", title));
    }
    if let Some(creation) = &update.creation_date {
        args.push(format!("-CreationDate={}", creation));
    }
    if let Some(modify) = &update.modify_date {
        args.push(format!("-ModifyDate={}", modify));
    }
    if let Some(lat) = update.gps_latitude {
        args.push(format!("-GPSLatitude={}", lat));
    }
    if let Some(lon) = update.gps_longitude {
        args.push(format!("-GPSLongitude={}", lon));
    }
    args
}
