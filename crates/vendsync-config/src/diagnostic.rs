// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! valid key listings and "did you mean?" suggestions using Jaro-Winkler
//! string similarity.

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `refresh_intervl` -> `refresh_interval_secs`
/// while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic help text.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(vendsync::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated list of valid keys for the section.
        valid_keys: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(vendsync::config::invalid_type))]
    InvalidType {
        /// Dotted path of the key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(vendsync::config::missing_key),
        help("add `{key} = <value>` to your vendsync.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A semantic validation failure for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(vendsync::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(vendsync::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may contain multiple underlying errors; each becomes one
/// diagnostic, with fuzzy suggestions attached to unknown-field errors.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid_keys),
                    valid_keys: valid_keys.join(", "),
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                let key = error
                    .path
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        })
        .collect()
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if no
/// valid key is close enough to the unknown key.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_close_typo() {
        let valid = &["base_url", "api_key"];
        assert_eq!(suggest_key("api_kye", valid), Some("api_key".to_string()));
    }

    #[test]
    fn suggest_interval_typo() {
        let valid = &[
            "refresh_interval_secs",
            "probe_timeout_secs",
            "max_concurrent_probes",
        ];
        assert_eq!(
            suggest_key("refresh_intervl_secs", valid),
            Some("refresh_interval_secs".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["base_url", "api_key"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn unknown_key_error_mentions_suggestion() {
        let err = ConfigError::UnknownKey {
            key: "api_kye".into(),
            suggestion: Some("api_key".into()),
            valid_keys: "base_url, api_key".into(),
        };
        assert!(err.to_string().contains("api_kye"));
    }
}
