//! Keeps local copies of RealmEye's sprite sheets current.
//!
//! The site embeds a rotating asset token in sprite URLs. Each run scans a few
//! pages for the current links ([`discovery`]), reconciles them with the URL
//! cache from the previous run and configured fallbacks ([`reconcile`]), and
//! downloads only the assets whose URL changed or whose file is missing.

pub mod asset;
pub mod cache;
pub mod checksum;
pub mod config;
pub mod discovery;
pub mod fetch;
pub mod logging;
pub mod reconcile;
pub mod storage;

pub use asset::Asset;
pub use config::SyncConfig;
pub use fetch::{CurlFetcher, FetchError, Fetcher};
pub use reconcile::{Reconciler, RunReport};
