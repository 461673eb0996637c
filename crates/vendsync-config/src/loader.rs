// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vendsync.toml` > `~/.config/vendsync/vendsync.toml`
//! > `/etc/vendsync/vendsync.toml` with environment variable overrides via the
//! `VENDSYNC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VendsyncConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vendsync/vendsync.toml` (system-wide)
/// 3. `~/.config/vendsync/vendsync.toml` (user XDG config)
/// 4. `./vendsync.toml` (local directory)
/// 5. `VENDSYNC_*` environment variables
pub fn load_config() -> Result<VendsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendsyncConfig::default()))
        .merge(Toml::file("/etc/vendsync/vendsync.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vendsync/vendsync.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vendsync.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<VendsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendsyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VendsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VendsyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `VENDSYNC_SYNC_REFRESH_INTERVAL_SECS`
/// must map to `sync.refresh_interval_secs`, not `sync.refresh.interval.secs`.
fn env_provider() -> Env {
    Env::prefixed("VENDSYNC_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: VENDSYNC_PLATFORM_AUTH_TOKEN -> "platform_auth_token"
        let mapped = key
            .as_str()
            .replacen("service_", "service.", 1)
            .replacen("platform_", "platform.", 1)
            .replacen("sync_", "sync.", 1)
            .replacen("geonet_", "geonet.", 1)
            .replacen("telcel_", "telcel.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[sync]
refresh_interval_secs = 60

[geonet]
api_key = "gk-123"
"#,
        )
        .unwrap();
        assert_eq!(config.sync.refresh_interval_secs, 60);
        assert_eq!(config.geonet.api_key.as_deref(), Some("gk-123"));
        // Untouched sections keep their defaults.
        assert_eq!(config.platform.page_size, 50);
    }

    #[test]
    fn env_var_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("vendsync.toml", "[service]\nname = \"from-toml\"\n")?;
            jail.set_env("VENDSYNC_SERVICE_NAME", "from-env");
            jail.set_env("VENDSYNC_SYNC_PROBE_TIMEOUT_SECS", "15");

            let config = load_config().expect("config should load");
            assert_eq!(config.service.name, "from-env");
            assert_eq!(config.sync.probe_timeout_secs, 15);
            Ok(())
        });
    }
}
