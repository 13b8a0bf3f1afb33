//! HTTP GET seam.
//!
//! Discovery and reconciliation only see the [`Fetcher`] trait, so tests can
//! script responses. [`CurlFetcher`] is the libcurl-backed implementation.

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

use std::time::Duration;
use thiserror::Error;

/// Why a GET produced no body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection reset, ...).
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

/// Fetches the full body of `url`, failing on transport errors and non-2xx status.
pub trait Fetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url, timeout)
    }
}
