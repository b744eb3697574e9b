// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the chatdesk support backend.
//!
//! This crate implements [`BackendAdapter`] on top of `reqwest`, speaking the
//! backend's JSON endpoints (`/api/chat`, `/api/escalate`, `/api/health`,
//! `/api/sync/trello`, `/api/conversations/{id}`).

pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use chatdesk_config::model::BackendConfig;
use chatdesk_core::{
    BackendAdapter, ChatReply, ChatRequest, ChatdeskError, ConversationEntry, ConversationId,
    EscalationPayload, HealthReport, SyncResult,
};
use serde_json::json;
use tracing::{debug, info};

pub use crate::client::BackendClient;
use crate::client::{CHAT_PATH, CONVERSATIONS_PATH, ESCALATE_PATH, HEALTH_PATH, SYNC_PATH};

/// [`BackendAdapter`] backed by the real HTTP service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: BackendClient,
    health_timeout: Duration,
}

impl HttpBackend {
    /// Creates the adapter from the `[backend]` config section.
    pub fn new(config: &BackendConfig) -> Result<Self, ChatdeskError> {
        let client = BackendClient::new(&config.base_url, config.request_timeout())?;
        info!(base_url = client.base_url(), "support backend client initialized");
        Ok(Self {
            client,
            health_timeout: config.health_timeout(),
        })
    }

    /// Creates the adapter for an explicit base URL with default timeouts.
    pub fn with_base_url(base_url: &str) -> Result<Self, ChatdeskError> {
        Self::new(&BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl BackendAdapter for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ChatdeskError> {
        debug!(
            has_conversation = request.conversation_id.is_some(),
            "sending chat message"
        );
        let url = self.client.endpoint(CHAT_PATH)?;
        self.client.post_json(url, request).await
    }

    async fn escalate(
        &self,
        payload: &EscalationPayload,
    ) -> Result<serde_json::Value, ChatdeskError> {
        let url = self.client.endpoint(ESCALATE_PATH)?;
        let body = self.client.post_raw(url, payload).await?;
        // The reply is only logged; keep non-JSON bodies as plain text.
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    async fn health(&self) -> Result<HealthReport, ChatdeskError> {
        let url = self.client.endpoint(HEALTH_PATH)?;
        self.client.get_json(url, Some(self.health_timeout)).await
    }

    async fn sync_conversations(&self) -> Result<SyncResult, ChatdeskError> {
        let url = self.client.endpoint(SYNC_PATH)?;
        self.client.post_json(url, &json!({})).await
    }

    async fn conversation_history(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ConversationEntry>, ChatdeskError> {
        let url = self
            .client
            .endpoint_with_segment(CONVERSATIONS_PATH, conversation_id.as_str())?;
        self.client.get_json(url, None).await
    }
}
