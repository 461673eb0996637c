// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch reconciliation: one round of probing every outstanding record.
//!
//! A pass snapshots the outstanding tickets under the store lock, releases
//! the lock for the whole network phase, probes with bounded concurrency,
//! and merges all settled results back in one final locked section. Probe
//! futures are infallible (failures are carried as data in the
//! [`vendsync_core::ProbeResult`]), so a slow or failed probe can never
//! abort the batch or lose the other results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info};
use vendsync_core::{ProbeResult, VendsyncError};
use vendsync_probe::ProbeRegistry;
use vendsync_store::{MergeOutcome, PurchaseStore};

/// Outcome counts of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassSummary {
    /// Tickets issued (records probed).
    pub probed: usize,
    /// Results merged into the store.
    pub updated: usize,
    /// Probes that failed; their records were left untouched.
    pub failed: usize,
    /// Results rejected because a later-issued probe already landed.
    pub stale: usize,
    /// Wall-clock duration of the pass.
    pub duration: Duration,
}

/// Refreshes all outstanding records in one concurrent pass.
pub struct BatchReconciler {
    registry: Arc<ProbeRegistry>,
    store: Arc<Mutex<PurchaseStore>>,
    max_concurrent: usize,
}

impl BatchReconciler {
    /// Creates a reconciler over a shared store and probe registry.
    ///
    /// `max_concurrent` bounds how many probes are in flight at once.
    pub fn new(
        registry: Arc<ProbeRegistry>,
        store: Arc<Mutex<PurchaseStore>>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            registry,
            store,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// The shared store this reconciler merges into.
    pub fn store(&self) -> Arc<Mutex<PurchaseStore>> {
        Arc::clone(&self.store)
    }

    /// Run one full reconciliation pass.
    ///
    /// The store lock is held only while issuing tickets and while merging;
    /// records updated by other callers during the network phase are
    /// protected by the tickets' sequence numbers at merge time.
    pub async fn run_pass(&self) -> PassSummary {
        let started = Instant::now();

        let tickets = self.store.lock().await.issue_outstanding();
        if tickets.is_empty() {
            let mut store = self.store.lock().await;
            store.mark_auto_update(Utc::now());
            debug!("reconciliation pass found nothing outstanding");
            return PassSummary {
                duration: started.elapsed(),
                ..PassSummary::default()
            };
        }

        let probed = tickets.len();
        let registry = Arc::clone(&self.registry);
        let results: Vec<(u64, ProbeResult)> = stream::iter(tickets)
            .map(|ticket| {
                let registry = Arc::clone(&registry);
                async move {
                    let result = registry
                        .probe(
                            &ticket.id,
                            ticket.provider,
                            &ticket.reference,
                            ticket.prior_status,
                        )
                        .await;
                    (ticket.seq, result)
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut summary = PassSummary {
            probed,
            ..PassSummary::default()
        };

        let mut store = self.store.lock().await;
        for (seq, result) in &results {
            match store.apply(*seq, result) {
                MergeOutcome::Applied => summary.updated += 1,
                MergeOutcome::ErrorKept => summary.failed += 1,
                MergeOutcome::Stale => summary.stale += 1,
                MergeOutcome::UnknownId => {}
            }
        }
        store.mark_auto_update(Utc::now());
        summary.duration = started.elapsed();

        info!(
            probed = summary.probed,
            updated = summary.updated,
            failed = summary.failed,
            stale = summary.stale,
            duration_ms = summary.duration.as_millis() as u64,
            "reconciliation pass settled"
        );
        summary
    }

    /// Probe a single record outside a batch (user-initiated check).
    ///
    /// Goes through the same ticket/merge path as a batch, so the race with
    /// a concurrent pass resolves by issue order.
    pub async fn run_single(&self, id: &str) -> Result<MergeOutcome, VendsyncError> {
        let ticket = self.store.lock().await.issue_probe(id)?;

        let result = self
            .registry
            .probe(
                &ticket.id,
                ticket.provider,
                &ticket.reference,
                ticket.prior_status,
            )
            .await;

        let mut store = self.store.lock().await;
        Ok(store.apply(ticket.seq, &result))
    }
}
