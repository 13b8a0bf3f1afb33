//! `sprite-sync config-path` – where the default config lives.

use anyhow::Result;
use sprite_sync_core::config;

pub fn run_config_path() -> Result<()> {
    println!("{}", config::config_path()?.display());
    Ok(())
}
