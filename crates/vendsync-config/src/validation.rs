// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shapes, interval bounds, and probe limits.

use crate::diagnostic::ConfigError;
use crate::model::VendsyncConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VendsyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    if config.sync.refresh_interval_secs < 10 {
        errors.push(ConfigError::Validation {
            message: format!(
                "sync.refresh_interval_secs must be at least 10, got {}",
                config.sync.refresh_interval_secs
            ),
        });
    }

    if config.sync.probe_timeout_secs == 0 || config.sync.probe_timeout_secs > 60 {
        errors.push(ConfigError::Validation {
            message: format!(
                "sync.probe_timeout_secs must be between 1 and 60, got {}",
                config.sync.probe_timeout_secs
            ),
        });
    }

    if config.sync.max_concurrent_probes == 0 {
        errors.push(ConfigError::Validation {
            message: "sync.max_concurrent_probes must be at least 1".to_string(),
        });
    }

    if config.platform.page_size == 0 || config.platform.page_size > 500 {
        errors.push(ConfigError::Validation {
            message: format!(
                "platform.page_size must be between 1 and 500, got {}",
                config.platform.page_size
            ),
        });
    }

    for (key, url) in [
        ("platform.base_url", &config.platform.base_url),
        ("geonet.base_url", &config.geonet.base_url),
        ("telcel.base_url", &config.telcel.base_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("{key} must start with http:// or https://, got `{url}`"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
