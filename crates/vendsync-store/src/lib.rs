// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase store, list fetch client, and view projection for Vendsync.
//!
//! The [`PurchaseStore`] is the single source of truth for purchase records
//! during a session. It is exclusively owned by one engine instance; merges
//! go through sequence-numbered tickets so concurrent probes cannot clobber
//! each other.

pub mod fetch;
pub mod store;
pub mod view;

pub use fetch::{load_all, PurchaseListClient};
pub use store::{MergeOutcome, ProbeTicket, PurchaseStore};
pub use view::{project, ProviderFilter, StatusFilter, ViewQuery};
