// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait for the conversational support backend.

use async_trait::async_trait;

use crate::error::ChatdeskError;
use crate::types::{
    ChatReply, ChatRequest, ConversationEntry, ConversationId, EscalationPayload, HealthReport,
    SyncResult,
};

/// Everything the client needs from the backend service.
///
/// Implementations propagate every failure as a [`ChatdeskError`]; deciding
/// whether a failure becomes a fallback bubble, a `false` health flag, or a
/// log line is the caller's job.
#[async_trait]
pub trait BackendAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// `POST /api/chat`.
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ChatdeskError>;

    /// `POST /api/escalate`. The response body is only logged, so it is
    /// returned untyped.
    async fn escalate(
        &self,
        payload: &EscalationPayload,
    ) -> Result<serde_json::Value, ChatdeskError>;

    /// `GET /api/health`.
    async fn health(&self) -> Result<HealthReport, ChatdeskError>;

    /// `POST /api/sync/trello` with an empty JSON object.
    async fn sync_conversations(&self) -> Result<SyncResult, ChatdeskError>;

    /// `GET /api/conversations/{id}`.
    async fn conversation_history(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ConversationEntry>, ChatdeskError>;
}
