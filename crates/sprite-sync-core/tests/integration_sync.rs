//! Integration test: real curl fetcher against a local site server.
//!
//! Serves discovery pages and sprite files, runs full syncs, and checks the
//! files on disk and the persisted URL cache.

mod common;

use common::site_server::{self, Routes};
use sprite_sync_core::config::FallbackUrls;
use sprite_sync_core::reconcile::{AssetResult, UrlSource};
use sprite_sync_core::{Asset, CurlFetcher, Reconciler, SyncConfig};
use std::path::Path;
use tempfile::tempdir;

fn config(base_url: &str, images_dir: &Path) -> SyncConfig {
    SyncConfig {
        base_url: base_url.to_string(),
        images_dir: images_dir.to_path_buf(),
        fallback: FallbackUrls::for_token(base_url, "gu"),
        discovery_timeout_secs: 5,
        download_timeout_secs: 10,
        connect_timeout_secs: 5,
        ..SyncConfig::default()
    }
}

fn read_cache(dir: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(dir.join("sprite_urls.json")).unwrap()).unwrap()
}

#[test]
fn sync_downloads_discovered_sprites_then_skips_on_second_run() {
    let sheets: Vec<u8> = (0u8..=255).cycle().take(40 * 1024).collect();
    let renders = b"\x89PNG renders".to_vec();
    let server = site_server::start(
        Routes::new()
            .ok(
                "/",
                r#"<html><link href="/s/hq/css/site.css" rel="stylesheet">
                <img src="/s/hq/img/sheets.png">
                <span style="background-image: url(/s/hq/css/renders.png)"></span></html>"#,
            )
            .ok("/s/hq/img/sheets.png", sheets.clone())
            .ok("/s/hq/css/renders.png", renders.clone()),
    );
    let dir = tempdir().unwrap();
    let cfg = config(&server.base_url, dir.path());
    let reconciler = Reconciler::new(cfg.clone(), CurlFetcher::from_config(&cfg));

    let first = reconciler.run().expect("first run");
    assert_eq!(first.discovery.asset_token.as_deref(), Some("hq"));
    for o in &first.outcomes {
        assert_eq!(o.plan.resolution.source, UrlSource::Discovered);
        assert!(matches!(o.result, AssetResult::Downloaded { .. }));
    }
    assert_eq!(std::fs::read(dir.path().join("sheets.png")).unwrap(), sheets);
    assert_eq!(std::fs::read(dir.path().join("renders.png")).unwrap(), renders);
    let cache = read_cache(dir.path());
    assert_eq!(cache["sheets.png"], format!("{}/s/hq/img/sheets.png", server.base_url));
    assert_eq!(cache["renders.png"], format!("{}/s/hq/css/renders.png", server.base_url));

    let second = reconciler.run().expect("second run");
    assert!(second.outcomes.iter().all(|o| o.result == AssetResult::Skipped));
    let sprite_requests = server
        .requests()
        .iter()
        .filter(|p| p.ends_with(".png"))
        .count();
    assert_eq!(sprite_requests, 2, "second run must not re-download");
}

#[test]
fn sync_falls_back_when_pages_fail_and_isolates_asset_failures() {
    let server = site_server::start(
        Routes::new()
            .status("/", 503)
            .status("/recent-deaths", 500)
            .ok("/s/gu/img/sheets.png", b"fallback sheets".to_vec()),
    );
    let dir = tempdir().unwrap();
    let cfg = config(&server.base_url, dir.path());
    let report = Reconciler::new(cfg.clone(), CurlFetcher::from_config(&cfg))
        .run()
        .expect("run");

    assert_eq!(report.discovery.pages_failed, 2);
    let by_asset = |a: Asset| report.outcomes.iter().find(|o| o.plan.asset == a).unwrap();
    assert_eq!(by_asset(Asset::Sheets).plan.resolution.source, UrlSource::Fallback);
    assert!(matches!(by_asset(Asset::Sheets).result, AssetResult::Downloaded { bytes: 15 }));
    match &by_asset(Asset::Renders).result {
        AssetResult::Failed { error } => assert!(error.contains("HTTP 404"), "{}", error),
        other => panic!("expected failure, got {:?}", other),
    }

    let cache = read_cache(dir.path());
    assert_eq!(cache["sheets.png"], format!("{}/s/gu/img/sheets.png", server.base_url));
    assert!(cache["renders.png"].is_null());
    assert!(!dir.path().join("renders.png").exists());
}
