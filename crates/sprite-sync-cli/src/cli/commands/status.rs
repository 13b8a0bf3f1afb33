//! `sprite-sync status` – cached URLs and local files.

use anyhow::Result;
use sprite_sync_core::cache::UrlCache;
use sprite_sync_core::checksum;
use sprite_sync_core::{Asset, SyncConfig};

pub fn run_status(cfg: &SyncConfig) -> Result<()> {
    let cache_path = cfg.cache_path();
    let cache = UrlCache::load(&cache_path);
    println!("cache: {}", cache_path.display());
    println!("{:<12} {:<10} {:<16} {}", "ASSET", "SIZE", "SHA256", "CACHED URL");
    for asset in Asset::ALL {
        let local = checksum::fingerprint_if_present(&asset.local_path(&cfg.images_dir))?;
        let (size, digest) = match &local {
            Some(fp) => (fp.bytes.to_string(), fp.sha256[..16].to_string()),
            None => ("-".to_string(), "(missing)".to_string()),
        };
        println!(
            "{:<12} {:<10} {:<16} {}",
            asset.file_name(),
            size,
            digest,
            cache.get(asset).unwrap_or("-")
        );
    }
    Ok(())
}
