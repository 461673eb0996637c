// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory purchase store with sequence-numbered probe merging.
//!
//! The store owns an ordered collection of [`PurchaseRecord`]s keyed by id.
//! Probes are issued as [`ProbeTicket`]s carrying a monotonically increasing
//! sequence number; [`PurchaseStore::apply`] rejects merges whose sequence is
//! not newer than the last one applied for that id. This makes the
//! manual-check-vs-batch race deterministic: the later-*issued* probe wins,
//! regardless of which network response arrives last.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use vendsync_core::{OrderStatus, ProbeResult, Provider, PurchaseRecord, VendsyncError};

/// Permission to probe one record, captured at issue time.
///
/// Holds everything the prober needs so the store lock can be released
/// while the network call is in flight.
#[derive(Debug, Clone)]
pub struct ProbeTicket {
    /// Record id the ticket was issued for.
    pub id: String,
    /// External reference to query.
    pub reference: String,
    /// Which provider API to call.
    pub provider: Provider,
    /// Status at issue time; a failed probe reports this back unchanged.
    pub prior_status: OrderStatus,
    /// Issue sequence number used for stale-write rejection on merge.
    pub seq: u64,
}

/// Outcome of merging one probe result into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Status and `last_checked` were updated.
    Applied,
    /// A newer probe for the same id was already applied; merge rejected.
    Stale,
    /// The probe errored; record untouched, error retained as transient state.
    ErrorKept,
    /// No record with this id exists.
    UnknownId,
}

/// Ordered, id-indexed collection of purchase records plus the transient
/// reconciliation state around them.
///
/// Records are never deleted by this subsystem and their relative order is
/// the platform's original order (the view projection relies on that).
pub struct PurchaseStore {
    records: Vec<PurchaseRecord>,
    index: HashMap<String, usize>,
    /// Issue sequence of the last applied update, per id.
    applied_seq: HashMap<String, u64>,
    /// Ids with a probe currently in flight (drives per-record spinners).
    checking: HashSet<String>,
    /// Most recent probe error per id; cleared on the next applied probe.
    probe_errors: HashMap<String, String>,
    next_seq: u64,
    last_auto_update: Option<DateTime<Utc>>,
}

impl PurchaseStore {
    /// Build a store from freshly fetched records.
    ///
    /// Duplicate ids are skipped (first occurrence wins) since the index
    /// must stay one-to-one.
    pub fn from_records(records: Vec<PurchaseRecord>) -> Self {
        let mut deduped: Vec<PurchaseRecord> = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            if index.contains_key(&record.id) {
                warn!(id = %record.id, "duplicate purchase id in list response, skipping");
                continue;
            }
            index.insert(record.id.clone(), deduped.len());
            deduped.push(record);
        }

        Self {
            records: deduped,
            index,
            applied_seq: HashMap::new(),
            checking: HashSet::new(),
            probe_errors: HashMap::new(),
            next_seq: 1,
            last_auto_update: None,
        }
    }

    /// All records in platform order.
    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    /// Look up one record by id.
    pub fn get(&self, id: &str) -> Option<&PurchaseRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Issue a probe ticket for one record, marking it as checking.
    ///
    /// Fails if the id is unknown or the record is not probeable
    /// (`Provider::None` or no external reference).
    pub fn issue_probe(&mut self, id: &str) -> Result<ProbeTicket, VendsyncError> {
        let record = self
            .get(id)
            .ok_or_else(|| VendsyncError::UnknownId(id.to_string()))?;

        if !record.is_probeable() {
            return Err(VendsyncError::NotProbeable(id.to_string()));
        }

        let ticket = ProbeTicket {
            id: record.id.clone(),
            reference: record
                .external_reference
                .clone()
                .unwrap_or_default(),
            provider: record.provider,
            prior_status: record.status,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.checking.insert(ticket.id.clone());
        Ok(ticket)
    }

    /// Issue tickets for every outstanding, probeable record.
    ///
    /// This is the batch-start snapshot: records whose status is terminal or
    /// unknown, or that cannot be probed, are not selected and a later merge
    /// pass will leave them untouched.
    pub fn issue_outstanding(&mut self) -> Vec<ProbeTicket> {
        let ids: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.status.is_outstanding() && r.is_probeable())
            .map(|r| r.id.clone())
            .collect();

        ids.iter()
            .filter_map(|id| self.issue_probe(id).ok())
            .collect()
    }

    /// Merge one probe result under the sequence number of its ticket.
    ///
    /// The checking flag for the id is cleared unconditionally, including on
    /// error and stale rejection, so a settled batch never leaves a spinner
    /// behind.
    pub fn apply(&mut self, seq: u64, result: &ProbeResult) -> MergeOutcome {
        self.checking.remove(&result.id);

        let Some(&pos) = self.index.get(&result.id) else {
            warn!(id = %result.id, "probe result for unknown id dropped");
            return MergeOutcome::UnknownId;
        };

        if let Some(err) = &result.error {
            // Prior status is preserved; the error is transient per-id state.
            self.probe_errors.insert(result.id.clone(), err.clone());
            return MergeOutcome::ErrorKept;
        }

        if self.applied_seq.get(&result.id).copied().unwrap_or(0) >= seq {
            debug!(id = %result.id, seq, "stale probe result rejected");
            return MergeOutcome::Stale;
        }

        let record = &mut self.records[pos];
        record.status = result.status;
        record.last_checked = Some(result.checked_at);
        self.applied_seq.insert(result.id.clone(), seq);
        self.probe_errors.remove(&result.id);
        MergeOutcome::Applied
    }

    /// Whether a probe is currently in flight for this id.
    pub fn is_checking(&self, id: &str) -> bool {
        self.checking.contains(id)
    }

    /// The most recent probe error for this id, if any.
    pub fn probe_error(&self, id: &str) -> Option<&str> {
        self.probe_errors.get(id).map(String::as_str)
    }

    /// Record the completion time of an automatic reconciliation pass.
    pub fn mark_auto_update(&mut self, at: DateTime<Utc>) {
        self.last_auto_update = Some(at);
    }

    /// When the last automatic reconciliation pass completed.
    pub fn last_auto_update(&self) -> Option<DateTime<Utc>> {
        self.last_auto_update
    }
}
