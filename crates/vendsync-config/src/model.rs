// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vendsync reconciliation engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Vendsync configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only credentials genuinely have to be supplied.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VendsyncConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Reselling-platform API settings (purchase list endpoint).
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Reconciliation cadence and probe limits.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Geonettech status API settings.
    #[serde(default)]
    pub geonet: GeonetConfig,

    /// Telcel-style status API settings.
    #[serde(default)]
    pub telcel: TelcelConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

/// Reselling-platform API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API.
    #[serde(default = "default_platform_base_url")]
    pub base_url: String,

    /// Bearer token for the platform API. Injected here so that no
    /// component reads ambient credential storage.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Page size for the paginated purchase list fetch.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_platform_base_url(),
            auth_token: None,
            page_size: default_page_size(),
        }
    }
}

/// Reconciliation cadence and probe limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Seconds between automatic reconciliation passes.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Per-probe timeout in seconds. Bounds a batch to roughly the slowest
    /// single probe even when a provider endpoint hangs.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Maximum number of probes in flight at once during a batch.
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            max_concurrent_probes: default_max_concurrent_probes(),
        }
    }
}

/// Geonettech status API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeonetConfig {
    /// Base URL of the Geonettech order API.
    #[serde(default = "default_geonet_base_url")]
    pub base_url: String,

    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GeonetConfig {
    fn default() -> Self {
        Self {
            base_url: default_geonet_base_url(),
            api_key: None,
        }
    }
}

/// Telcel-style status API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelcelConfig {
    /// Base URL of the Telcel transaction API.
    #[serde(default = "default_telcel_base_url")]
    pub base_url: String,

    /// API key sent in the `x-api-key` header.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for TelcelConfig {
    fn default() -> Self {
        Self {
            base_url: default_telcel_base_url(),
            api_key: None,
        }
    }
}

fn default_service_name() -> String {
    "vendsync".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_platform_base_url() -> String {
    "https://api.datahub.example/v1".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_probe_timeout_secs() -> u64 {
    12
}

fn default_max_concurrent_probes() -> usize {
    8
}

fn default_geonet_base_url() -> String {
    "https://connect.geonettech.site/api/v1".to_string()
}

fn default_telcel_base_url() -> String {
    "https://console.hubnet.app/live/api/context/business/transaction".to_string()
}
