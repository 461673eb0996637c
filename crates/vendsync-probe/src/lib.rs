// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider status-check clients for the Vendsync reconciliation engine.
//!
//! Each provider gets its own reqwest client with its own URL template,
//! authentication header, and response shape, all normalized into the shared
//! [`vendsync_core::OrderStatus`] enum. The [`ProbeRegistry`] resolves a
//! record's provider to the right client once, instead of branching at every
//! call site.

pub mod geonet;
pub mod registry;
pub mod telcel;

pub use geonet::GeonetClient;
pub use registry::ProbeRegistry;
pub use telcel::TelcelClient;
