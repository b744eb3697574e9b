// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot conversation sync to the task board.

use std::sync::Arc;

use chatdesk_core::{BackendAdapter, SyncResult};
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info};

/// Runs one sync. A failed request is folded into the result's `error`.
pub async fn trigger_sync(backend: &dyn BackendAdapter) -> SyncResult {
    backend
        .sync_conversations()
        .await
        .unwrap_or_else(|e| SyncResult::from_error(e.to_string()))
}

/// Logs the summary line, or the error when the sync failed.
pub fn log_sync_result(result: &SyncResult) {
    match &result.error {
        Some(error) => error!(%error, "conversation sync failed"),
        None => info!(
            total = result.total,
            details = result.details.len(),
            "{}",
            result.summary()
        ),
    }
}

/// Runs [`trigger_sync`] on a detached task and logs its outcome.
pub fn spawn_background_sync(backend: Arc<dyn BackendAdapter>) -> JoinHandle<SyncResult> {
    info!("starting background conversation sync");
    tokio::spawn(
        async move {
            let result = trigger_sync(backend.as_ref()).await;
            log_sync_result(&result);
            result
        }
        .in_current_span(),
    )
}
