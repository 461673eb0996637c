// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `sync` subcommand: one reconciliation pass, or one single-record
//! probe, then exit.

use vendsync_config::VendsyncConfig;
use vendsync_core::VendsyncError;
use vendsync_store::MergeOutcome;

use crate::engine;

pub async fn run(config: &VendsyncConfig, id: Option<&str>) -> Result<(), VendsyncError> {
    let reconciler = engine::build_reconciler(config).await?;

    match id {
        Some(id) => {
            let outcome = reconciler.run_single(id).await?;
            let store = reconciler.store();
            let store = store.lock().await;
            let record = store
                .get(id)
                .ok_or_else(|| VendsyncError::UnknownId(id.to_string()))?;
            match outcome {
                MergeOutcome::Applied => {
                    println!("{id}: {}", record.status);
                }
                MergeOutcome::ErrorKept => {
                    let detail = store.probe_error(id).unwrap_or_default();
                    println!("{id}: still {} (probe failed: {detail})", record.status);
                }
                MergeOutcome::Stale => {
                    println!("{id}: {} (a newer check already landed)", record.status);
                }
                MergeOutcome::UnknownId => {
                    return Err(VendsyncError::UnknownId(id.to_string()));
                }
            }
        }
        None => {
            let summary = reconciler.run_pass().await;
            println!(
                "probed {} purchase(s): {} updated, {} failed, {} stale in {}ms",
                summary.probed,
                summary.updated,
                summary.failed,
                summary.stale,
                summary.duration.as_millis()
            );
        }
    }

    Ok(())
}
