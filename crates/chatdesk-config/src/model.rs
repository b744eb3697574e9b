// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the chatdesk client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level chatdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatdeskConfig {
    /// Support backend location and HTTP timeouts.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Conversation session behavior (escalation keywords, UX delays).
    #[serde(default)]
    pub session: SessionConfig,

    /// Background conversation sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Interactive shell settings.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Support backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend; endpoint paths such as `/api/chat` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for chat, escalation, sync, and history requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for the startup health probe.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_health_timeout_secs() -> u64 {
    5
}

/// Conversation session configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Pause before the escalation prompt opens.
    #[serde(default = "default_escalation_delay_ms")]
    pub escalation_delay_ms: u64,

    /// Pause between a successful escalation and the session restart.
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,

    /// Phrases that route a message straight to a human, matched
    /// case-insensitively as substrings.
    #[serde(default = "default_escalation_keywords")]
    pub escalation_keywords: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            escalation_delay_ms: default_escalation_delay_ms(),
            reload_delay_ms: default_reload_delay_ms(),
            escalation_keywords: default_escalation_keywords(),
        }
    }
}

impl SessionConfig {
    pub fn escalation_delay(&self) -> Duration {
        Duration::from_millis(self.escalation_delay_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

fn default_escalation_delay_ms() -> u64 {
    1000
}

fn default_reload_delay_ms() -> u64 {
    5000
}

fn default_escalation_keywords() -> Vec<String> {
    vec!["mitarbeiter".to_string(), "real person".to_string()]
}

/// Background sync configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Fire the one-shot sync after a healthy startup probe.
    #[serde(default = "default_sync_enabled")]
    pub enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: default_sync_enabled(),
        }
    }
}

fn default_sync_enabled() -> bool {
    true
}

/// Interactive shell configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Remove `【…】` citation markers from bot replies before printing.
    #[serde(default = "default_strip_sources")]
    pub strip_sources: bool,

    /// Address shown by `/feedback`. `None` hides the command's output.
    #[serde(default)]
    pub feedback_address: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            strip_sources: default_strip_sources(),
            feedback_address: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_strip_sources() -> bool {
    true
}
