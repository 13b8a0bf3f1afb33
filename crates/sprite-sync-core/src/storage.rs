//! Disk writes for images and the URL cache.
//!
//! Every write goes to a `.part` temp file in the destination directory and is
//! renamed over the final path, so readers see either the old file or the
//! complete new one.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Writes `data` to `final_path` via temp file + fsync + rename.
///
/// Creates the parent directory if needed. On error the temp file is removed
/// and any existing file at `final_path` is left untouched.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> Result<()> {
    let dir = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;

    let prefix = final_path
        .file_name()
        .map(|n| format!(".{}.", n.to_string_lossy()))
        .unwrap_or_else(|| ".sprite-sync.".to_string());
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;

    temp.write_all(data)
        .with_context(|| format!("write temp file for {}", final_path.display()))?;
    temp.as_file().sync_all().context("storage sync failed")?;
    temp.persist(final_path)
        .map_err(|e| e.error)
        .with_context(|| format!("rename temp file to {}", final_path.display()))?;
    Ok(())
}
