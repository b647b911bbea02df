use anyhow::Result;
use backend::exiftool::ExifTool;
use clap::Parser;
use sidesync_core::config;
use sidesync_core::config::AppConfig;
use sidesync_core::driver::{self, SyncOptions, SyncSummary};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).init();

    let cfg = config::load(cli.config.as_deref())?;
    run_sync(cfg, cli).await
}

#[derive(Parser)]
#[command(name = "sidesync")]
#[command(about = "Sync sidecar metadata into photo and video tags", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding the media files
    #[arg(long)]
    photos_directory: PathBuf,

    /// Log every file as it is examined
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Report what would change without writing
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

async fn run_sync(cfg: AppConfig, cli: Cli) -> Result<()> {
    let metadata_dir = cli.photos_directory.join(&cfg.library.metadata_dir);
    let tool = ExifTool::new(&cfg.backend.exiftool)
        .with_timeout(cfg.backend.timeout_secs.map(Duration::from_secs));

    let reports = driver::sync_directory(
        &cli.photos_directory,
        &metadata_dir,
        &cfg.library.extensions,
        SyncOptions {
            dry_run: cli.dry_run,
        },
        &tool,
    )
    .await?;

    let summary = SyncSummary::tally(&reports);
    if cli.json {
        let out = serde_json::json!({
            "summary": summary,
            "files": reports,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "sync summary: processed={}, updated={}, up_to_date={}, missing_sidecar={}, invalid_dates={}, failed={}, dry_run={}",
            summary.processed,
            summary.updated,
            summary.up_to_date,
            summary.missing_sidecar,
            summary.invalid_dates,
            summary.failed,
            cli.dry_run
        );
    }
    Ok(())
}
