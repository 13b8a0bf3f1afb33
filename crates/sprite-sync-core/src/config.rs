use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::asset::Asset;

/// Site origin the discovery pages and relative links resolve against.
pub const DEFAULT_BASE_URL: &str = "https://www.realmeye.com";

/// Asset token baked into the fallback URLs.
pub const FALLBACK_ASSET_TOKEN: &str = "gu";

/// Last-resort URLs, one per asset (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackUrls {
    pub sheets: String,
    pub renders: String,
}

impl FallbackUrls {
    /// Builds `<base>/s/<token>/<dir>/<file>` for every asset.
    pub fn for_token(base_url: &str, token: &str) -> Self {
        let url = |asset: Asset| {
            format!(
                "{}/s/{}/{}/{}",
                base_url.trim_end_matches('/'),
                token,
                asset.site_dir(),
                asset.file_name()
            )
        };
        Self {
            sheets: url(Asset::Sheets),
            renders: url(Asset::Renders),
        }
    }

    pub fn get(&self, asset: Asset) -> &str {
        match asset {
            Asset::Sheets => &self.sheets,
            Asset::Renders => &self.renders,
        }
    }
}

impl Default for FallbackUrls {
    fn default() -> Self {
        Self::for_token(DEFAULT_BASE_URL, FALLBACK_ASSET_TOKEN)
    }
}

/// Configuration for one sync run, loaded from `~/.config/sprite-sync/config.toml`.
///
/// Passed by value into the reconciler; nothing reads global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Site origin, e.g. `https://www.realmeye.com`.
    pub base_url: String,
    /// Pages scanned for asset links, in order. Relative to `base_url`.
    pub discovery_pages: Vec<String>,
    /// Directory holding the images and the URL cache.
    pub images_dir: PathBuf,
    /// Cache file name inside `images_dir`.
    pub cache_file_name: String,
    /// Per-page timeout for discovery requests.
    pub discovery_timeout_secs: u64,
    /// Timeout for a whole asset download.
    pub download_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Last-resort URL per asset (`[fallback]` table).
    pub fallback: FallbackUrls,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            discovery_pages: vec!["/".to_string(), "/recent-deaths".to_string()],
            images_dir: PathBuf::from("./images"),
            cache_file_name: "sprite_urls.json".to_string(),
            discovery_timeout_secs: 10,
            download_timeout_secs: 60,
            connect_timeout_secs: 15,
            user_agent: concat!("sprite-sync/", env!("CARGO_PKG_VERSION")).to_string(),
            fallback: FallbackUrls::default(),
        }
    }
}

impl SyncConfig {
    pub fn cache_path(&self) -> PathBuf {
        self.images_dir.join(&self.cache_file_name)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sprite-sync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<SyncConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
