//! `sprite-sync sync` – discover, download what changed, persist the URL cache.

use anyhow::Result;
use sprite_sync_core::reconcile::{AssetResult, Decision};
use sprite_sync_core::{CurlFetcher, Reconciler, SyncConfig};

pub fn run_sync(cfg: SyncConfig, dry_run: bool) -> Result<()> {
    let fetcher = CurlFetcher::from_config(&cfg);
    let reconciler = Reconciler::new(cfg, fetcher);

    if dry_run {
        let plan = reconciler.plan();
        for p in &plan.assets {
            let action = match p.decision {
                Decision::Skip => "skip".to_string(),
                Decision::Fetch(reason) => format!("fetch ({reason})"),
            };
            println!(
                "{:<12} {:<18} {:<10} {}",
                p.asset.file_name(),
                action,
                p.resolution.source,
                p.resolution.url
            );
        }
        return Ok(());
    }

    let report = reconciler.run()?;
    for o in &report.outcomes {
        let status = match &o.result {
            AssetResult::Skipped => "up to date".to_string(),
            AssetResult::Downloaded { bytes } => format!("downloaded {bytes} bytes"),
            AssetResult::Failed { error } => format!("FAILED: {error}"),
        };
        println!("{:<12} {} [{}]", o.plan.asset.file_name(), status, o.plan.resolution.source);
    }
    if report.failed() > 0 {
        println!(
            "{} asset(s) failed; their cached urls were kept and will be retried next run.",
            report.failed()
        );
    }
    Ok(())
}
