//! libcurl-backed [`Fetcher`].

use std::time::Duration;

use super::{FetchError, Fetcher};
use crate::config::SyncConfig;

/// Blocking GET via a fresh `curl::easy::Easy` per request.
///
/// Follows redirects. The per-request timeout comes from the caller so
/// discovery and downloads can use different limits.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    user_agent: String,
}

impl CurlFetcher {
    pub fn new(connect_timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            connect_timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self::new(cfg.connect_timeout(), cfg.user_agent.clone())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            tracing::debug!("GET {} returned HTTP {}", url, code);
            return Err(FetchError::Status(code));
        }
        tracing::debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }
}
