// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry resolving each record to its status probe.
//!
//! Call sites never branch on provider shapes; they hand the registry a
//! record's coordinates and get back a [`ProbeResult`] that is *always*
//! produced, success or failure. This is what makes a batch all-settled by
//! construction: probe futures cannot fail, failures are data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use vendsync_core::{OrderStatus, ProbeResult, Provider, StatusProbe};

/// Registry of status probes keyed by provider.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: HashMap<Provider, Arc<dyn StatusProbe>>,
}

impl ProbeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe under its own provider. Replaces any existing
    /// probe for the same provider.
    pub fn register(&mut self, probe: Arc<dyn StatusProbe>) {
        self.probes.insert(probe.provider(), probe);
    }

    /// Look up the probe for a provider.
    pub fn resolve(&self, provider: Provider) -> Option<Arc<dyn StatusProbe>> {
        self.probes.get(&provider).cloned()
    }

    /// Number of registered probes.
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Whether no probes are registered.
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Probe one record's status, converting every failure into data.
    ///
    /// On success the result carries the normalized fresh status. On any
    /// failure (no probe registered, network error, timeout, bad payload)
    /// the result carries `prior_status` unchanged and an error message,
    /// so no information is lost and the caller's join never fails.
    pub async fn probe(
        &self,
        id: &str,
        provider: Provider,
        reference: &str,
        prior_status: OrderStatus,
    ) -> ProbeResult {
        let Some(probe) = self.resolve(provider) else {
            warn!(id, %provider, "no status probe registered for provider");
            return ProbeResult {
                id: id.to_string(),
                status: prior_status,
                checked_at: Utc::now(),
                error: Some(format!("no status probe registered for {provider}")),
            };
        };

        match probe.check_status(reference).await {
            Ok(status) => ProbeResult {
                id: id.to_string(),
                status,
                checked_at: Utc::now(),
                error: None,
            },
            Err(e) => {
                warn!(id, %provider, error = %e, "status probe failed");
                ProbeResult {
                    id: id.to_string(),
                    status: prior_status,
                    checked_at: Utc::now(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
