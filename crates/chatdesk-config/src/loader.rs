// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./chatdesk.toml` > `~/.config/chatdesk/chatdesk.toml` > `/etc/chatdesk/chatdesk.toml`
//! with environment variable overrides via `CHATDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use tracing::debug;

use crate::model::ChatdeskConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/chatdesk/chatdesk.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "chatdesk.toml";

/// Top-level sections an environment variable may address.
const ENV_SECTIONS: &[&str] = &["backend", "session", "sync", "shell"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/chatdesk/chatdesk.toml` (system-wide)
/// 3. `~/.config/chatdesk/chatdesk.toml` (user XDG config)
/// 4. `./chatdesk.toml` (local directory)
/// 5. `CHATDESK_*` environment variables
pub fn load_config() -> Result<ChatdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ChatdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChatdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ChatdeskConfig, figment::Error> {
    debug!(path = %path.display(), "loading explicit config file");
    Figment::new()
        .merge(Serialized::defaults(ChatdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    debug!(
        system = SYSTEM_CONFIG_PATH,
        local = LOCAL_CONFIG_FILE,
        "resolving config hierarchy"
    );
    Figment::new()
        .merge(Serialized::defaults(ChatdeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `$XDG_CONFIG_HOME/chatdesk/chatdesk.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chatdesk").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider with explicit section-to-dot mapping.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `CHATDESK_BACKEND_BASE_URL` maps to `backend.base_url`, not `backend.base.url`.
fn env_provider() -> Env {
    Env::prefixed("CHATDESK_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
