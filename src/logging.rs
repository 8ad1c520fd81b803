//! Tracing setup for the catalog server.
//!
//! Events go to stdout and are appended to the configured log file.
//! `RUST_LOG` directives are honoured on top of the configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{CatalogError, Result};

/// Per-statement sqlx logging is noise at info level.
const QUIET_SQLX: &str = "sqlx::query=warn";

/// Map a configured level name to a filter; unknown names fall back to INFO.
fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => LevelFilter::INFO,
        "warning" => LevelFilter::WARN,
        other => LevelFilter::from_str(other)
            .ok()
            .filter(|f| *f != LevelFilter::OFF)
            .unwrap_or(LevelFilter::INFO),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy();

    match QUIET_SQLX.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber.
///
/// The log file's directory is created on demand. Fails when the file
/// cannot be opened or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = Path::new(&config.file);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let log_file = OpenOptions::new().create(true).append(true).open(path)?;
    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| CatalogError::Config(format!("logging already initialized: {e}")))
}

/// Install a stdout-only subscriber (development, or when `init` fails).
///
/// Does nothing if a subscriber is already installed.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
