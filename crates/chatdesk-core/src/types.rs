// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the backend adapter, the message store, and the shell.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque backend-issued token correlating a sequence of chat exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Author of a message in the local session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat bubble. Never mutated after it is appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sequential id, unique within one session (1-based).
    pub id: u64,
    pub from: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(id: u64, from: Sender, content: impl Into<String>) -> Self {
        Self {
            id,
            from,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// --- Wire types for /api/chat ---

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted from the body until the backend has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_id: Option<ConversationId>) -> Self {
        Self {
            message: message.into(),
            conversation_id,
        }
    }
}

/// Directive the backend can attach to a chat reply instead of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    /// Hand the conversation over to a human operator.
    OpenRealPersonDialog,
    /// Any directive this client does not understand.
    #[serde(other)]
    Unknown,
}

/// Response body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub action: Option<ReplyAction>,
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
}

impl ChatReply {
    /// True when the backend asked for a human handoff.
    pub fn requests_escalation(&self) -> bool {
        self.action == Some(ReplyAction::OpenRealPersonDialog)
    }
}

// --- Wire types for /api/escalate ---

/// Request body for `POST /api/escalate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    pub email: String,
}

// --- Wire types for /api/health ---

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthReport {
    /// The backend only counts as alive when it literally reports `"ok"`.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// --- Wire types for /api/sync/trello ---

/// Outcome of syncing one conversation to the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Skipped,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Per-conversation line of a sync summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDetail {
    pub conversation_id: String,
    pub status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_url: Option<String>,
}

/// Summary returned by a background sync run.
///
/// A failed request is folded into this type with only `error` set, so the
/// caller never has to handle a sync error separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default)]
    pub success: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<SyncDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResult {
    /// A result that carries nothing but the failure reason.
    pub fn from_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// One-line human summary of the counts.
    pub fn summary(&self) -> String {
        format!(
            "Synced {} conversations, skipped {}, failed {}",
            self.success, self.skipped, self.failed
        )
    }
}

// --- Wire types for /api/conversations/{id} ---

/// A message as the backend stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}
