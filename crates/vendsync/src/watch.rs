// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `watch` subcommand: run the auto-refresh scheduler until Ctrl-C.

use std::time::Duration;

use tracing::info;
use vendsync_config::VendsyncConfig;
use vendsync_core::VendsyncError;
use vendsync_reconcile::scheduler;

use crate::engine;

pub async fn run(config: &VendsyncConfig) -> Result<(), VendsyncError> {
    let reconciler = engine::build_reconciler(config).await?;
    let interval = Duration::from_secs(config.sync.refresh_interval_secs);

    let handle = scheduler::spawn(reconciler, interval);
    info!(
        interval_secs = interval.as_secs(),
        "watching; press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| VendsyncError::Internal(format!("failed to listen for Ctrl-C: {e}")))?;

    info!("shutting down");
    handle.shutdown().await;
    Ok(())
}
