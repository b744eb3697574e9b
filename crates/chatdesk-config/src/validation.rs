// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ChatdeskConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &ChatdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        fail("backend.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "backend.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.backend.request_timeout_secs == 0 {
        fail("backend.request_timeout_secs must be greater than 0".to_string());
    }
    if config.backend.health_timeout_secs == 0 {
        fail("backend.health_timeout_secs must be greater than 0".to_string());
    }

    if config.session.escalation_keywords.is_empty() {
        fail("session.escalation_keywords must contain at least one keyword".to_string());
    }
    for (i, keyword) in config.session.escalation_keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            fail(format!("session.escalation_keywords[{i}] must not be blank"));
        }
    }

    let level = config.shell.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "shell.log_level `{}` is not one of {}",
            config.shell.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
