//! Persisted last-known-good URL per asset (`sprite_urls.json`).
//!
//! The file is a JSON object keyed by asset file name, each value a URL string
//! or `null`. Loading never fails: a missing or unreadable file, or one that
//! is not such an object, yields an empty cache. Saving always writes an entry
//! for every asset.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::asset::Asset;
use crate::storage;

/// In-memory view of the URL cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlCache {
    entries: BTreeMap<Asset, String>,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached URL for `asset`; `None` if absent or stored as `null`.
    pub fn get(&self, asset: Asset) -> Option<&str> {
        self.entries.get(&asset).map(String::as_str)
    }

    pub fn set(&mut self, asset: Asset, url: impl Into<String>) {
        self.entries.insert(asset, url.into());
    }

    /// Loads the cache from `path`, falling back to an empty cache on any problem.
    pub fn load(path: &Path) -> UrlCache {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no url cache at {}", path.display());
                return UrlCache::new();
            }
            Err(e) => {
                tracing::warn!("read url cache {}: {}; starting empty", path.display(), e);
                return UrlCache::new();
            }
        };
        match Self::from_json(&bytes) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!("parse url cache {}: {}; starting empty", path.display(), e);
                UrlCache::new()
            }
        }
    }

    /// Parses the on-disk JSON object.
    ///
    /// Only known asset keys with a string value are taken; `null`, other
    /// value types and unknown keys are skipped. Anything but an object is an error.
    pub fn from_json(bytes: &[u8]) -> Result<UrlCache> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes).context("url cache is not a JSON object")?;
        let mut cache = UrlCache::new();
        for (name, value) in raw {
            let Some(asset) = Asset::from_file_name(&name) else {
                tracing::debug!("ignoring unknown url cache key {:?}", name);
                continue;
            };
            match value {
                serde_json::Value::String(url) => cache.set(asset, url),
                serde_json::Value::Null => {}
                other => tracing::debug!("ignoring non-string url cache entry {}: {}", name, other),
            }
        }
        Ok(cache)
    }

    /// Pretty JSON with exactly one key per asset.
    pub fn to_json(&self) -> Result<String> {
        let full: BTreeMap<&str, Option<&str>> = Asset::ALL
            .iter()
            .map(|a| (a.file_name(), self.get(*a)))
            .collect();
        serde_json::to_string_pretty(&full).context("serialize url cache")
    }

    /// Atomically replaces the cache file at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        storage::write_atomic(path, json.as_bytes())
            .with_context(|| format!("write url cache: {}", path.display()))
    }
}
