//! CLI for sprite-sync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sprite_sync_core::config::{self, SyncConfig};
use std::path::PathBuf;

use commands::{run_config_path, run_discover, run_status, run_sync};

/// Top-level CLI for sprite-sync.
#[derive(Debug, Parser)]
#[command(name = "sprite-sync")]
#[command(about = "Keep local copies of RealmEye sprite sheets up to date", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/sprite-sync/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for the images and the URL cache (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    pub images_dir: Option<PathBuf>,

    /// Site origin used for discovery and relative links (overrides config).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Discover current sprite URLs and download what changed.
    Sync {
        /// Show what would be downloaded without downloading or writing the cache.
        #[arg(long)]
        dry_run: bool,
    },

    /// Scan the discovery pages and print the sprite URLs found.
    Discover,

    /// Show cached URLs and local sprite files.
    Status,

    /// Print the default config file path.
    ConfigPath,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match &cli.command {
            CliCommand::Sync { dry_run } => run_sync(cli.load_config()?, *dry_run)?,
            CliCommand::Discover => run_discover(&cli.load_config()?)?,
            CliCommand::Status => run_status(&cli.load_config()?)?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }

    /// Config file (explicit or default) with command-line overrides applied.
    fn load_config(&self) -> Result<SyncConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        let cfg = self.apply_overrides(cfg);
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, mut cfg: SyncConfig) -> SyncConfig {
        if let Some(dir) = &self.images_dir {
            cfg.images_dir = dir.clone();
        }
        if let Some(base) = &self.base_url {
            cfg.base_url = base.clone();
        }
        cfg
    }
}

#[cfg(test)]
mod tests;
