// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires configuration into a ready-to-run reconciliation engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};
use vendsync_config::VendsyncConfig;
use vendsync_core::{PurchaseRecord, VendsyncError};
use vendsync_probe::{GeonetClient, ProbeRegistry, TelcelClient};
use vendsync_reconcile::BatchReconciler;
use vendsync_store::{PurchaseListClient, PurchaseStore};

/// Build the probe registry from whatever provider credentials are present.
///
/// A provider without an API key is simply not registered; its records keep
/// their stored status and probing them reports an error instead of
/// guessing.
pub fn build_registry(config: &VendsyncConfig) -> Result<ProbeRegistry, VendsyncError> {
    let timeout = Duration::from_secs(config.sync.probe_timeout_secs);
    let mut registry = ProbeRegistry::new();

    match &config.geonet.api_key {
        Some(key) => {
            registry.register(Arc::new(GeonetClient::new(
                config.geonet.base_url.clone(),
                key,
                timeout,
            )?));
        }
        None => warn!("geonet.api_key not configured, GEONET records will not be probed"),
    }

    match &config.telcel.api_key {
        Some(key) => {
            registry.register(Arc::new(TelcelClient::new(
                config.telcel.base_url.clone(),
                key,
                timeout,
            )?));
        }
        None => warn!("telcel.api_key not configured, TELCEL records will not be probed"),
    }

    Ok(registry)
}

/// Fetch every purchase page from the platform.
pub async fn fetch_purchases(config: &VendsyncConfig) -> Result<Vec<PurchaseRecord>, VendsyncError> {
    let client = PurchaseListClient::new(
        config.platform.base_url.clone(),
        config.platform.auth_token.as_deref(),
    )?;
    vendsync_store::load_all(&client, config.platform.page_size).await
}

/// Fetch purchases and assemble the full reconciler over them.
pub async fn build_reconciler(
    config: &VendsyncConfig,
) -> Result<Arc<BatchReconciler>, VendsyncError> {
    let registry = build_registry(config)?;
    let records = fetch_purchases(config).await?;
    info!(records = records.len(), "purchase store loaded");

    let store = Arc::new(Mutex::new(PurchaseStore::from_records(records)));
    Ok(Arc::new(BatchReconciler::new(
        Arc::new(registry),
        store,
        config.sync.max_concurrent_probes,
    )))
}
