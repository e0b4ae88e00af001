use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset; each `-v` raises the level by one.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "jira_ui=warn",
        1 => "jira_ui=info",
        2 => "jira_ui=debug",
        _ => "jira_ui=trace",
    }
}

/// Install the global subscriber. Output goes to `path` because the
/// terminal belongs to the UI while it runs.
pub fn init(verbosity: u8, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}
