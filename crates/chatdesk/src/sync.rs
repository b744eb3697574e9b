// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chatdesk sync` command implementation: one foreground sync run.

use chatdesk_core::{BackendAdapter, ChatdeskError, SyncResult};
use chatdesk_session::{log_sync_result, trigger_sync};

pub async fn run_sync(backend: &dyn BackendAdapter, json: bool) -> Result<(), ChatdeskError> {
    let result = trigger_sync(backend).await;
    log_sync_result(&result);

    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| ChatdeskError::Internal(format!("failed to render sync result: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", format_result(&result));
    }

    match result.error {
        Some(error) => Err(ChatdeskError::Internal(format!("sync failed: {error}"))),
        None => Ok(()),
    }
}

fn format_result(result: &SyncResult) -> String {
    if result.error.is_some() {
        return String::new();
    }

    let mut out = format!("{}\n", result.summary());
    for detail in &result.details {
        out.push_str(&format!("  {:<8} {}", detail.status.to_string(), detail.conversation_id));
        if let Some(url) = &detail.card_url {
            out.push_str(&format!("  {url}"));
        }
        if let Some(reason) = &detail.reason {
            out.push_str(&format!("  ({reason})"));
        }
        out.push('\n');
    }
    out
}
