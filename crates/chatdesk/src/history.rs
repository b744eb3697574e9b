// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chatdesk history` command implementation.

use chatdesk_core::{BackendAdapter, ChatdeskError, ConversationEntry, ConversationId};
use chatdesk_session::strip_sources;

pub async fn run_history(
    backend: &dyn BackendAdapter,
    conversation_id: &ConversationId,
    json: bool,
    strip: bool,
) -> Result<(), ChatdeskError> {
    let entries = backend.conversation_history(conversation_id).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&entries)
            .map_err(|e| ChatdeskError::Internal(format!("failed to render history: {e}")))?;
        println!("{rendered}");
    } else if entries.is_empty() {
        println!("no messages stored for conversation {conversation_id}");
    } else {
        for entry in &entries {
            println!("{}", format_entry(entry, strip));
        }
    }
    Ok(())
}

pub(crate) fn format_entry(entry: &ConversationEntry, strip: bool) -> String {
    let content = if strip {
        strip_sources(&entry.content)
    } else {
        entry.content.as_str().into()
    };
    format!("[{}] {}: {}", entry.timestamp, entry.role, content)
}
