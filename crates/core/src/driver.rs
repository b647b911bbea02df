//! Walks a photo directory and reconciles each media file against its
//! sidecar, one file at a time.

use crate::{normalize, reconcile, sidecar};
use anyhow::bail;
use backend::MetadataBackend;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Report what would change without invoking the writer.
    pub dry_run: bool,
}

/// What happened to one media file. Failures are isolated here so the
/// batch always runs to completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum FileOutcome {
    Updated,
    WouldUpdate,
    UpToDate,
    MissingSidecar,
    InvalidDates,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path after extension normalization.
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SyncSummary {
    pub processed: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub missing_sidecar: usize,
    pub invalid_dates: usize,
    pub failed: usize,
}

impl SyncSummary {
    pub fn tally(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.processed += 1;
            match &report.outcome {
                FileOutcome::Updated | FileOutcome::WouldUpdate => summary.updated += 1,
                FileOutcome::UpToDate => summary.up_to_date += 1,
                FileOutcome::MissingSidecar => summary.missing_sidecar += 1,
                FileOutcome::InvalidDates => summary.invalid_dates += 1,
                FileOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Reconcile every media file directly inside `photos_dir` against the
/// sidecars in `metadata_dir`. Per-file failures become `Failed`
/// reports; only an unusable photos directory aborts the pass.
pub async fn sync_directory(
    photos_dir: &Path,
    metadata_dir: &Path,
    extensions: &[String],
    opts: SyncOptions,
    backend: &dyn MetadataBackend,
) -> anyhow::Result<Vec<FileReport>> {
    if !photos_dir.is_dir() {
        bail!("photos directory {:?} is not a directory", photos_dir);
    }

    // Snapshot the listing first: the pass renames files in place, and a
    // streaming directory iterator can yield a renamed entry twice.
    let mut files = Vec::new();
    for entry in WalkDir::new(photos_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() || !is_media_file(entry.path(), extensions) {
            continue;
        }
        files.push(entry.into_path());
    }

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        reports.push(sync_file(path, metadata_dir, opts, backend).await);
    }
    Ok(reports)
}

fn is_media_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

async fn sync_file(
    path: PathBuf,
    metadata_dir: &Path,
    opts: SyncOptions,
    backend: &dyn MetadataBackend,
) -> FileReport {
    let path = match normalize::lowercase_extension(&path) {
        Ok(p) => p,
        Err(err) => {
            warn!("failed to normalize {:?}: {}", path, err);
            return FileReport {
                path,
                outcome: FileOutcome::Failed(err.to_string()),
            };
        }
    };

    let sidecar_path = sidecar::path_for(&path, metadata_dir);
    if !sidecar_path.exists() {
        debug!("no sidecar for {:?}, skipping", path);
        return FileReport {
            path,
            outcome: FileOutcome::MissingSidecar,
        };
    }

    let meta = match sidecar::read(&sidecar_path) {
        Ok(meta) => meta,
        Err(err) => {
            warn!("unreadable sidecar for {:?}: {:#}", path, err);
            return FileReport {
                path,
                outcome: FileOutcome::Failed(format!("{:#}", err)),
            };
        }
    };

    let current = match backend.read_tags(&path).await {
        Ok(tags) => tags,
        Err(err) => {
            warn!("failed to read tags from {:?}: {}", path, err);
            return FileReport {
                path,
                outcome: FileOutcome::Failed(err.to_string()),
            };
        }
    };

    if !reconcile::needs_update(&current, &meta) {
        info!("{:?} already up to date", path);
        return FileReport {
            path,
            outcome: FileOutcome::UpToDate,
        };
    }

    let update = match reconcile::build_update(&meta) {
        Some(update) => update,
        None => {
            info!("skipping {:?}: sidecar dates are unparsable", path);
            return FileReport {
                path,
                outcome: FileOutcome::InvalidDates,
            };
        }
    };

    if opts.dry_run {
        info!("would update {:?}", path);
        return FileReport {
            path,
            outcome: FileOutcome::WouldUpdate,
        };
    }

    match backend.write_tags(&path, &update).await {
        Ok(()) => {
            info!("updated {:?}", path);
            FileReport {
                path,
                outcome: FileOutcome::Updated,
            }
        }
        Err(err) => {
            warn!("failed to write tags to {:?}: {}", path, err);
            FileReport {
                path,
                outcome: FileOutcome::Failed(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        ["jpg", "jpeg", "png", "mp4", "mov"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn media_extensions_match_case_insensitively() {
        let exts = exts();
        assert!(is_media_file(Path::new("a.jpg"), &exts));
        assert!(is_media_file(Path::new("a.JPG"), &exts));
        assert!(is_media_file(Path::new("clip.MOV"), &exts));
        assert!(!is_media_file(Path::new("notes.txt"), &exts));
        assert!(!is_media_file(Path::new("archive"), &exts));
    }

    #[test]
    fn summary_tallies_outcomes() {
        let reports = vec![
            FileReport {
                path: PathBuf::from("a.jpg"),
                outcome: FileOutcome::Updated,
            },
            FileReport {
                path: PathBuf::from("b.jpg"),
                outcome: FileOutcome::UpToDate,
            },
            FileReport {
                path: PathBuf::from("c.jpg"),
                outcome: FileOutcome::MissingSidecar,
            },
            FileReport {
                path: PathBuf::from("d.jpg"),
                outcome: FileOutcome::Failed("boom".to_string()),
            },
        ];
        let summary = SyncSummary::tally(&reports);
        assert_eq!(summary.processed, 4);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.up_to_date, 1);
        assert_eq!(summary.missing_sidecar, 1);
        assert_eq!(summary.invalid_dates, 0);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn failed_reports_serialize_with_detail() {
        let report = FileReport {
            path: PathBuf::from("a.jpg"),
            outcome: FileOutcome::Failed("boom".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["detail"], "boom");

        let report = FileReport {
            path: PathBuf::from("b.jpg"),
            outcome: FileOutcome::UpToDate,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "up_to_date");
    }
}
