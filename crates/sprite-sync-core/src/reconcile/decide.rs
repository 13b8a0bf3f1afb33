//! Pure resolution and re-fetch decisions for a single asset.

use std::fmt;

use crate::asset::Asset;
use crate::cache::UrlCache;
use crate::config::FallbackUrls;
use crate::discovery::Discovery;

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Discovered,
    Cached,
    Fallback,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            UrlSource::Discovered => "discovered",
            UrlSource::Cached => "cached",
            UrlSource::Fallback => "fallback",
        })
    }
}

/// The URL chosen for an asset this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub source: UrlSource,
}

/// Why an asset is downloaded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    MissingFile,
    NotCached,
    UrlChanged,
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            FetchReason::MissingFile => "local file missing",
            FetchReason::NotCached => "no cached url",
            FetchReason::UrlChanged => "url changed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Fetch(FetchReason),
}

/// Discovered, then cached, then fallback.
pub fn resolve(
    asset: Asset,
    discovered: &Discovery,
    cache: &UrlCache,
    fallback: &FallbackUrls,
) -> Resolution {
    if let Some(url) = discovered.get(asset) {
        return Resolution {
            url: url.to_string(),
            source: UrlSource::Discovered,
        };
    }
    if let Some(url) = cache.get(asset) {
        return Resolution {
            url: url.to_string(),
            source: UrlSource::Cached,
        };
    }
    Resolution {
        url: fallback.get(asset).to_string(),
        source: UrlSource::Fallback,
    }
}

/// Fetch when the local file is missing, nothing was cached, or the URL moved.
pub fn decide(resolved_url: &str, cached_url: Option<&str>, local_exists: bool) -> Decision {
    if !local_exists {
        return Decision::Fetch(FetchReason::MissingFile);
    }
    match cached_url {
        None => Decision::Fetch(FetchReason::NotCached),
        Some(cached) if cached != resolved_url => Decision::Fetch(FetchReason::UrlChanged),
        Some(_) => Decision::Skip,
    }
}
