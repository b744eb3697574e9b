// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup liveness probe.

use chatdesk_core::BackendAdapter;
use tracing::{info, warn};

/// Returns `true` only when the backend reports `status == "ok"`.
///
/// Every failure, including a non-`ok` status, is logged and becomes `false`.
pub async fn check_health(backend: &dyn BackendAdapter) -> bool {
    let adapter = backend.name();
    match backend.health().await {
        Ok(report) if report.is_ok() => {
            info!(
                adapter,
                version = report.version.as_deref().unwrap_or("unknown"),
                "backend is running"
            );
            true
        }
        Ok(report) => {
            warn!(adapter, status = %report.status, "backend reported an unhealthy status");
            false
        }
        Err(e) => {
            warn!(adapter, error = %e, "backend health check failed");
            false
        }
    }
}
