//! Logging setup.
//!
//! Log lines go to `~/.local/state/sprite-sync/sprite-sync.log`. When that
//! file can't be opened the CLI installs the stderr subscriber instead.

use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,sprite_sync_core=debug,sprite_sync=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global fmt subscriber writing to `writer`.
fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))
}

/// Log file path under the XDG state dir; creates the directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sprite-sync")?;
    Ok(xdg_dirs.place_state_file("sprite-sync.log")?)
}

/// Opens the log file for appending.
fn open_log(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Log to the state-dir file and return its path.
///
/// Every event is written through one shared append-mode handle.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = Arc::new(open_log(&path)?);
    install(file)?;
    tracing::info!("sprite-sync logging initialized at {}", path.display());
    Ok(path)
}

/// Log to stderr. Use when `init_logging` fails; a second init is a no-op.
pub fn init_logging_stderr() {
    let _ = install(std::io::stderr);
}
