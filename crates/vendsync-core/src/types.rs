// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Vendsync reconciliation crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Delivery status of a data-bundle purchase, as reported by the platform
/// or a provider status API.
///
/// Status is externally authoritative: the reconciler never computes
/// transitions, it only stores whatever the remote side last reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Waiting,
    Completed,
    Failed,
    Refunded,
    Unknown,
}

impl OrderStatus {
    /// Terminal statuses are never probed again automatically.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Refunded)
    }

    /// Outstanding statuses are selected for batch reconciliation.
    pub fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Waiting)
    }

    /// Normalize a raw status string from a remote API into the shared enum.
    ///
    /// Provider APIs disagree on vocabulary ("delivered" vs "completed",
    /// "accepted" vs "processing"). Unrecognized values map to `Unknown`
    /// rather than erroring so a new backend status never breaks a batch.
    pub fn from_remote(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "completed" | "complete" | "delivered" | "success" => Self::Completed,
            "pending" => Self::Pending,
            "processing" | "accepted" => Self::Processing,
            "waiting" | "queued" | "on hold" => Self::Waiting,
            "failed" | "error" | "cancelled" | "canceled" => Self::Failed,
            "refunded" | "reversed" => Self::Refunded,
            _ => Self::Unknown,
        }
    }
}

/// Which third-party status API serves a purchase record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    /// Geonettech order API (`data.status` response shape).
    Geonet,
    /// Telcel-style transaction API (`data.order.status` response shape).
    Telcel,
    /// No status API available; the record is never probed.
    None,
}

impl Provider {
    /// Map the platform's network name onto the provider that tracks it.
    pub fn from_network(network: &str) -> Self {
        match network.trim().to_ascii_lowercase().as_str() {
            "mtn" | "yello" | "geonet" => Self::Geonet,
            "telecel" | "telcel" | "at" | "airteltigo" => Self::Telcel,
            _ => Self::None,
        }
    }

    /// Human-readable network name shown to users and matched by search.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Geonet => "MTN",
            Self::Telcel => "Telecel",
            Self::None => "unsupported",
        }
    }
}

/// One data-bundle purchase as held in the in-memory store.
///
/// `id` is immutable once created. `phone_number`, `capacity`, `price` and
/// `created_at` are display-only and opaque to the reconciliation logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Stable identifier, unique within the store.
    pub id: String,
    /// Reference used to query the provider status API. Absent means the
    /// record is not probeable.
    pub external_reference: Option<String>,
    /// Which provider status API to call for this record.
    pub provider: Provider,
    /// Last known delivery status.
    pub status: OrderStatus,
    /// Recipient phone number.
    pub phone_number: String,
    /// Bundle size, e.g. "5GB". Kept as text; the platform emits both
    /// numbers and strings for this field.
    pub capacity: String,
    /// Price paid, in the platform currency.
    pub price: f64,
    /// When the purchase was created on the platform.
    pub created_at: Option<DateTime<Utc>>,
    /// Timestamp of the last successfully applied probe.
    pub last_checked: Option<DateTime<Utc>>,
}

impl PurchaseRecord {
    /// Whether this record can be probed at all.
    ///
    /// Records with `Provider::None` or without an external reference are
    /// never selected for probing.
    pub fn is_probeable(&self) -> bool {
        self.provider != Provider::None
            && self
                .external_reference
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty())
    }
}

/// Result of one status probe. Ephemeral: produced by a prober, consumed
/// immediately by the merge path, never persisted on its own.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Id of the record this result belongs to.
    pub id: String,
    /// Normalized status. On failure this is the record's prior status,
    /// so no information is lost.
    pub status: OrderStatus,
    /// When the probe settled.
    pub checked_at: DateTime<Utc>,
    /// Error message if the probe failed. An errored result leaves the
    /// record untouched apart from transient error state.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Unknown.is_terminal());
    }

    #[test]
    fn outstanding_statuses() {
        assert!(OrderStatus::Pending.is_outstanding());
        assert!(OrderStatus::Processing.is_outstanding());
        assert!(OrderStatus::Waiting.is_outstanding());
        assert!(!OrderStatus::Completed.is_outstanding());
        // Unknown is neither terminal nor outstanding.
        assert!(!OrderStatus::Unknown.is_outstanding());
    }

    #[test]
    fn normalize_remote_vocabulary() {
        assert_eq!(OrderStatus::from_remote("delivered"), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_remote("  Completed "), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_remote("accepted"), OrderStatus::Processing);
        assert_eq!(OrderStatus::from_remote("on hold"), OrderStatus::Waiting);
        assert_eq!(OrderStatus::from_remote("CANCELLED"), OrderStatus::Failed);
        assert_eq!(OrderStatus::from_remote("reversed"), OrderStatus::Refunded);
        assert_eq!(OrderStatus::from_remote("shipped"), OrderStatus::Unknown);
    }

    #[test]
    fn provider_from_network_names() {
        assert_eq!(Provider::from_network("mtn"), Provider::Geonet);
        assert_eq!(Provider::from_network("YELLO"), Provider::Geonet);
        assert_eq!(Provider::from_network("Telecel"), Provider::Telcel);
        assert_eq!(Provider::from_network("at"), Provider::Telcel);
        assert_eq!(Provider::from_network("vodafone"), Provider::None);
    }

    #[test]
    fn probeable_requires_provider_and_reference() {
        let mut rec = PurchaseRecord {
            id: "p1".into(),
            external_reference: Some("R1".into()),
            provider: Provider::Geonet,
            status: OrderStatus::Pending,
            phone_number: "0551234567".into(),
            capacity: "5GB".into(),
            price: 23.0,
            created_at: None,
            last_checked: None,
        };
        assert!(rec.is_probeable());

        rec.provider = Provider::None;
        assert!(!rec.is_probeable());

        rec.provider = Provider::Geonet;
        rec.external_reference = Some("   ".into());
        assert!(!rec.is_probeable());

        rec.external_reference = None;
        assert!(!rec.is_probeable());
    }

    #[test]
    fn status_serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let back: OrderStatus = serde_json::from_str("\"waiting\"").unwrap();
        assert_eq!(back, OrderStatus::Waiting);
    }
}
