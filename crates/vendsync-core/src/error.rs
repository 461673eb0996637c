// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vendsync reconciliation engine.

use thiserror::Error;

use crate::types::Provider;

/// The primary error type used across Vendsync crates.
#[derive(Debug, Error)]
pub enum VendsyncError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Purchase list fetch errors (connection failure, non-2xx, bad payload).
    ///
    /// A list error aborts the load entirely; no partial store is created.
    #[error("list fetch error: {message}")]
    List {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single status probe against a provider API failed.
    ///
    /// Probe errors never abort a batch; the reconciler converts them into
    /// per-record transient state and moves on.
    #[error("probe error ({provider}): {message}")]
    Probe {
        provider: Provider,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A probe exceeded the configured per-request timeout.
    #[error("probe timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The requested record does not exist in the store.
    #[error("unknown purchase id: {0}")]
    UnknownId(String),

    /// The record cannot be probed (no external reference or no provider).
    #[error("purchase {0} is not probeable")]
    NotProbeable(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
