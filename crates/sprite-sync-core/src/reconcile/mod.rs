//! Resolution and cache reconciliation.
//!
//! One run: load the URL cache, discover current links once, resolve a URL
//! per asset (discovered, then cached, then fallback), download the assets
//! whose local copy is missing or stale, and persist the updated cache.
//!
//! Assets are processed independently in [`Asset::ALL`] order. A failed
//! download is reported in its outcome and does not advance that asset's
//! cache entry, so the next run retries the same URL.

mod decide;

pub use decide::{decide, resolve, Decision, FetchReason, Resolution, UrlSource};

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::asset::Asset;
use crate::cache::UrlCache;
use crate::config::SyncConfig;
use crate::discovery::{self, Discovery};
use crate::fetch::Fetcher;
use crate::storage;

/// Resolution and decision for one asset, before any download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAsset {
    pub asset: Asset,
    pub resolution: Resolution,
    /// Cached URL at run start.
    pub cached: Option<String>,
    pub decision: Decision,
    pub local_path: PathBuf,
}

/// Everything decided before downloading.
#[derive(Debug, Clone)]
pub struct Plan {
    pub previous: UrlCache,
    pub discovery: Discovery,
    pub assets: Vec<PlannedAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetResult {
    Skipped,
    Downloaded { bytes: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOutcome {
    pub plan: PlannedAsset,
    pub result: AssetResult,
}

/// Result of a completed run. The cache in `updated_cache` has been persisted.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub discovery: Discovery,
    pub outcomes: Vec<AssetOutcome>,
    pub updated_cache: UrlCache,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, AssetResult::Failed { .. }))
            .count()
    }
}

/// Drives one sync run against an explicit configuration and fetcher.
pub struct Reconciler<F: Fetcher> {
    config: SyncConfig,
    fetcher: F,
}

impl<F: Fetcher> Reconciler<F> {
    pub fn new(config: SyncConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Load, discover, resolve and decide. No downloads, no writes.
    pub fn plan(&self) -> Plan {
        let cfg = &self.config;
        let previous = UrlCache::load(&cfg.cache_path());
        let discovery = discovery::discover(
            &self.fetcher,
            &cfg.discovery_pages,
            &cfg.base_url,
            cfg.discovery_timeout(),
        );

        let assets = Asset::ALL
            .iter()
            .map(|&asset| {
                let resolution = resolve(asset, &discovery, &previous, &cfg.fallback);
                let cached = previous.get(asset).map(str::to_string);
                let local_path = asset.local_path(&cfg.images_dir);
                let decision = decide(&resolution.url, cached.as_deref(), local_path.exists());
                tracing::debug!(
                    "{}: {} url {} -> {:?}",
                    asset,
                    resolution.source,
                    resolution.url,
                    decision
                );
                PlannedAsset {
                    asset,
                    resolution,
                    cached,
                    decision,
                    local_path,
                }
            })
            .collect();

        Plan {
            previous,
            discovery,
            assets,
        }
    }

    /// Full run: plan, download what needs it, then persist the cache.
    ///
    /// Per-asset download failures are reported in the outcomes. The only
    /// error returned is a failed cache write, after every asset was processed.
    pub fn run(&self) -> Result<RunReport> {
        let plan = self.plan();
        let mut updated = plan.previous.clone();
        let mut outcomes = Vec::with_capacity(plan.assets.len());

        for planned in plan.assets {
            let result = match planned.decision {
                Decision::Skip => {
                    tracing::info!("{} up to date ({})", planned.asset, planned.resolution.url);
                    updated.set(planned.asset, planned.resolution.url.clone());
                    AssetResult::Skipped
                }
                Decision::Fetch(reason) => {
                    tracing::info!(
                        "downloading {} from {} ({})",
                        planned.asset,
                        planned.resolution.url,
                        reason
                    );
                    match self.download(&planned) {
                        Ok(bytes) => {
                            tracing::info!("saved {} ({} bytes)", planned.local_path.display(), bytes);
                            updated.set(planned.asset, planned.resolution.url.clone());
                            AssetResult::Downloaded { bytes }
                        }
                        Err(e) => {
                            tracing::warn!("download {} failed: {:#}", planned.asset, e);
                            AssetResult::Failed {
                                error: format!("{:#}", e),
                            }
                        }
                    }
                }
            };
            outcomes.push(AssetOutcome {
                plan: planned,
                result,
            });
        }

        let cache_path = self.config.cache_path();
        updated
            .save(&cache_path)
            .context("persist url cache after sync")?;
        tracing::debug!("url cache written to {}", cache_path.display());

        Ok(RunReport {
            discovery: plan.discovery,
            outcomes,
            updated_cache: updated,
        })
    }

    fn download(&self, planned: &PlannedAsset) -> Result<u64> {
        let body = self
            .fetcher
            .fetch(&planned.resolution.url, self.config.download_timeout())
            .with_context(|| format!("GET {}", planned.resolution.url))?;
        storage::write_atomic(&planned.local_path, &body)?;
        Ok(body.len() as u64)
    }
}
