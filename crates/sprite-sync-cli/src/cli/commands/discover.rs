//! `sprite-sync discover` – scan discovery pages only.

use anyhow::Result;
use sprite_sync_core::discovery;
use sprite_sync_core::{Asset, CurlFetcher, SyncConfig};

pub fn run_discover(cfg: &SyncConfig) -> Result<()> {
    let fetcher = CurlFetcher::from_config(cfg);
    let found = discovery::discover(
        &fetcher,
        &cfg.discovery_pages,
        &cfg.base_url,
        cfg.discovery_timeout(),
    );

    for asset in Asset::ALL {
        println!(
            "{:<12} {}",
            asset.file_name(),
            found.get(asset).unwrap_or("(not found)")
        );
    }
    println!(
        "asset token: {}",
        found.asset_token.as_deref().unwrap_or("(not found)")
    );
    println!(
        "pages: {} scanned, {} failed",
        found.pages_scanned, found.pages_failed
    );
    Ok(())
}
