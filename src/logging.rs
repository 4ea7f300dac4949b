//! Tracing setup for the server and CLI.
//!
//! Everything is written to stdout with a compact formatter. A second, ANSI-free layer mirrors
//! the output into a log file: `DOCSUM_LOG_FILE` picks the path, `DOCSUM_LOG_FILE=off` disables
//! it, and the default is `logs/docsum.log`.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE: &str = "logs/docsum.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` controls filtering and defaults to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let file_layer = resolve_log_file(std::env::var("DOCSUM_LOG_FILE").ok())
        .and_then(|path| open_file_writer(&path))
        .map(|writer| {
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact()
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

/// Map the raw `DOCSUM_LOG_FILE` value to a file path, or `None` when file logging is off.
fn resolve_log_file(raw: Option<String>) -> Option<PathBuf> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        Some(value) if value.eq_ignore_ascii_case("off") => None,
        Some(value) => Some(PathBuf::from(value)),
    }
}

fn open_file_writer(path: &Path) -> Option<NonBlocking> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let Some(file_name) = path.file_name() else {
        eprintln!("Log file path {} has no file name", path.display());
        return None;
    };
    if let Err(err) = std::fs::create_dir_all(directory) {
        eprintln!("Failed to create log directory {}: {err}", directory.display());
        return None;
    }

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}
