//! Sprite URL discovery.
//!
//! Fetches a fixed list of site pages in order and scans their HTML for the
//! current sprite links. The first link found per asset wins; scanning stops
//! once every asset has a URL. A page that fails to load yields nothing.

mod scan;

pub use scan::{scan_asset_token, scan_sprite_links, SpriteLink};

use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::asset::Asset;
use crate::fetch::Fetcher;

/// What one discovery pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// At most one URL per asset.
    pub urls: BTreeMap<Asset, String>,
    /// Asset token from the first versioned stylesheet link seen. Informational.
    pub asset_token: Option<String>,
    /// Pages fetched and scanned.
    pub pages_scanned: usize,
    /// Pages whose fetch failed.
    pub pages_failed: usize,
}

impl Discovery {
    pub fn get(&self, asset: Asset) -> Option<&str> {
        self.urls.get(&asset).map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        Asset::ALL.iter().all(|a| self.urls.contains_key(a))
    }

    /// Folds one page's text in. Already-discovered assets are not overwritten.
    fn absorb_page(&mut self, html: &str, base: &Url) {
        for link in scan_sprite_links(html, base) {
            self.urls.entry(link.asset).or_insert(link.url);
        }
        if self.asset_token.is_none() {
            self.asset_token = scan_asset_token(html);
        }
    }
}

/// Scans `pages` (paths or absolute URLs, joined onto `base_url`) for sprite links.
///
/// Never fails: an unparseable base or page, or a failed fetch, is logged and
/// treated as a page without links.
pub fn discover<F: Fetcher>(
    fetcher: &F,
    pages: &[String],
    base_url: &str,
    timeout: Duration,
) -> Discovery {
    let mut found = Discovery::default();

    let base = match Url::parse(base_url) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("invalid base url {:?}: {}; skipping discovery", base_url, e);
            return found;
        }
    };

    for page in pages {
        if found.is_complete() {
            break;
        }
        let page_url = match base.join(page) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("invalid discovery page {:?}: {}", page, e);
                found.pages_failed += 1;
                continue;
            }
        };
        match fetcher.fetch(page_url.as_str(), timeout) {
            Ok(body) => {
                let html = String::from_utf8_lossy(&body);
                found.absorb_page(&html, &base);
                found.pages_scanned += 1;
                tracing::debug!(
                    "scanned {}: {} of {} assets found so far",
                    page_url,
                    found.urls.len(),
                    Asset::ALL.len()
                );
            }
            Err(e) => {
                tracing::warn!("discovery page {} failed: {}", page_url, e);
                found.pages_failed += 1;
            }
        }
    }

    if let Some(token) = &found.asset_token {
        tracing::debug!("site asset token: {}", token);
    }
    tracing::info!(
        "discovery found {} of {} assets ({} pages scanned, {} failed)",
        found.urls.len(),
        Asset::ALL.len(),
        found.pages_scanned,
        found.pages_failed
    );
    found
}
