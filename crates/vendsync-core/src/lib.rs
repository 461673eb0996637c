// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vendsync reconciliation engine.
//!
//! Provides the purchase data model, the shared error type, and the trait
//! seams (`StatusProbe`, `PurchaseSource`) implemented by the HTTP crates
//! and by test doubles.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VendsyncError;
pub use traits::{PurchasePage, PurchaseSource, StatusProbe};
pub use types::{OrderStatus, ProbeResult, Provider, PurchaseRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct_and_display() {
        let list = VendsyncError::List {
            message: "HTTP 500".into(),
            source: None,
        };
        assert!(list.to_string().contains("list fetch error"));

        let probe = VendsyncError::Probe {
            provider: Provider::Geonet,
            message: "connection refused".into(),
            source: Some(Box::new(std::io::Error::other("refused"))),
        };
        assert!(probe.to_string().contains("GEONET"));

        let timeout = VendsyncError::Timeout {
            duration: std::time::Duration::from_secs(12),
        };
        assert!(timeout.to_string().contains("12"));

        let _ = VendsyncError::Config("bad".into());
        let _ = VendsyncError::UnknownId("p1".into());
        let _ = VendsyncError::NotProbeable("p1".into());
        let _ = VendsyncError::Internal("oops".into());
    }

    #[test]
    fn status_display_and_parse_round_trip() {
        use std::str::FromStr;

        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Waiting,
            OrderStatus::Completed,
            OrderStatus::Failed,
            OrderStatus::Refunded,
            OrderStatus::Unknown,
        ] {
            let s = status.to_string();
            assert_eq!(OrderStatus::from_str(&s).unwrap(), status);
        }
    }

    #[test]
    fn trait_objects_are_send_sync() {
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<dyn StatusProbe>();
        _assert_send_sync::<dyn PurchaseSource>();
    }
}
