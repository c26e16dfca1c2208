use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use snapshot_store::SnapshotStore;
use status_watch::checks;
use status_watch::config::WatchConfig;
use status_watch::feed::HttpFeed;
use status_watch::watch::{apply_reports, built_in_checks, run_checks};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let config = WatchConfig::load().context("loading watch configuration")?;
    init_logging(&config.log_file).context("opening log file")?;

    if !checks::internet_reachable() {
        tracing::error!("not connected to the internet, skipping checks");
        return Ok(ExitCode::FAILURE);
    }

    let store = SnapshotStore::new(&config.snapshot_file);
    let mut snapshot = store.load().context("loading snapshot")?;

    let feed = HttpFeed::new(&config.feed).context("constructing status feed")?;
    let reports = run_checks(&built_in_checks(&config.instances));
    apply_reports(&mut snapshot, &reports, &feed).context("posting status updates")?;

    store.save(&snapshot).context("saving snapshot")?;
    Ok(ExitCode::SUCCESS)
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
