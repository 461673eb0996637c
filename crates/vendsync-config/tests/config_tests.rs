// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Vendsync configuration system.

use vendsync_config::diagnostic::{suggest_key, ConfigError};
use vendsync_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[service]
name = "vendsync-staging"
log_level = "debug"

[platform]
base_url = "https://staging.datahub.example/v1"
auth_token = "tok-123"
page_size = 25

[sync]
refresh_interval_secs = 120
probe_timeout_secs = 10
max_concurrent_probes = 4

[geonet]
base_url = "https://connect.geonettech.site/api/v1"
api_key = "gk-abc"

[telcel]
base_url = "https://console.hubnet.app/live/api/context/business/transaction"
api_key = "tk-def"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "vendsync-staging");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.platform.auth_token.as_deref(), Some("tok-123"));
    assert_eq!(config.platform.page_size, 25);
    assert_eq!(config.sync.refresh_interval_secs, 120);
    assert_eq!(config.sync.probe_timeout_secs, 10);
    assert_eq!(config.sync.max_concurrent_probes, 4);
    assert_eq!(config.geonet.api_key.as_deref(), Some("gk-abc"));
    assert_eq!(config.telcel.api_key.as_deref(), Some("tk-def"));
}

/// Empty TOML falls back to compiled defaults for every section.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "vendsync");
    assert_eq!(config.service.log_level, "info");
    assert!(config.platform.auth_token.is_none());
    assert_eq!(config.platform.page_size, 50);
    assert_eq!(config.sync.refresh_interval_secs, 300);
    assert_eq!(config.sync.probe_timeout_secs, 12);
    assert_eq!(config.sync.max_concurrent_probes, 8);
    assert!(config.geonet.api_key.is_none());
    assert!(config.telcel.api_key.is_none());
}

/// Unknown field in a section produces an error mentioning the bad key.
#[test]
fn unknown_field_in_sync_produces_error() {
    let toml = r#"
[sync]
refresh_intervl_secs = 60
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("refresh_intervl_secs"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// load_and_validate_str converts figment unknown-field errors into
/// diagnostics with a typo suggestion.
#[test]
fn unknown_field_gets_suggestion_diagnostic() {
    let toml = r#"
[geonet]
api_kye = "gk-abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce diagnostics");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "api_kye" && suggestion.as_deref() == Some("api_key")
        )
    });
    assert!(found, "expected UnknownKey with api_key suggestion, got: {errors:?}");
}

/// Semantic validation runs after successful deserialization.
#[test]
fn semantic_validation_catches_bad_values() {
    let toml = r#"
[sync]
refresh_interval_secs = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("refresh_interval_secs"))
    ));
}

/// A fully valid config passes both deserialization and validation.
#[test]
fn valid_config_passes_end_to_end() {
    let toml = r#"
[platform]
auth_token = "tok"

[sync]
refresh_interval_secs = 60
"#;
    let config = load_and_validate_str(toml).expect("should be valid");
    assert_eq!(config.sync.refresh_interval_secs, 60);
}

/// Suggestion helper surfaces the closest valid key.
#[test]
fn suggest_key_finds_close_match() {
    let valid = &["name", "log_level"];
    assert_eq!(suggest_key("log_lvel", valid), Some("log_level".to_string()));
    assert_eq!(suggest_key("qqqq", valid), None);
}
