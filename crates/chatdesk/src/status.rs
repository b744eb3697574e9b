// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chatdesk status` command implementation.
//!
//! Probes the backend health endpoint and reports the state, version, and
//! server time. Falls back gracefully when the backend is unreachable.

use std::io::IsTerminal;

use chatdesk_client::HttpBackend;
use chatdesk_core::{BackendAdapter, ChatdeskError, HealthReport};
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub status: String,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub backend_url: String,
    pub error: Option<String>,
}

impl StatusResponse {
    fn from_probe(backend_url: &str, probe: Result<HealthReport, ChatdeskError>) -> Self {
        match probe {
            Ok(report) => Self {
                running: report.is_ok(),
                status: report.status,
                version: report.version,
                timestamp: report.timestamp,
                backend_url: backend_url.to_string(),
                error: None,
            },
            Err(e) => Self {
                running: false,
                status: "not running".to_string(),
                version: None,
                timestamp: None,
                backend_url: backend_url.to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Run the `chatdesk status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(backend: &HttpBackend, json: bool, plain: bool) -> Result<(), ChatdeskError> {
    let probe = backend.health().await;
    let status = StatusResponse::from_probe(backend.base_url(), probe);

    if json {
        let rendered = serde_json::to_string_pretty(&status)
            .map_err(|e| ChatdeskError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&status, use_color);
    }

    Ok(())
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  chatdesk status");
    println!("  {}", "-".repeat(35));

    match (status.running, use_color) {
        (true, true) => {
            use colored::Colorize;
            println!("    State:    {} {}", "✓".green(), status.status.green());
        }
        (true, false) => println!("    State:    [OK] {}", status.status),
        (false, true) => {
            use colored::Colorize;
            println!("    State:    {} {}", "✗".red(), status.status.red());
        }
        (false, false) => println!("    State:    [FAIL] {}", status.status),
    }

    if let Some(version) = &status.version {
        println!("    Version:  {version}");
    }
    if let Some(timestamp) = &status.timestamp {
        println!("    Time:     {timestamp}");
    }
    println!("    Endpoint: {}/api/health", status.backend_url);
    if let Some(error) = &status.error {
        println!("    Error:    {error}");
    }
    println!();
}
