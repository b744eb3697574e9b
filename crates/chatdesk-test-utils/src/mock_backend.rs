// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock support backend for deterministic testing.
//!
//! `MockBackend` implements `BackendAdapter` with pre-configured outcomes per
//! endpoint and captures every request for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use chatdesk_core::{
    BackendAdapter, ChatReply, ChatRequest, ChatdeskError, ConversationEntry, ConversationId,
    EscalationPayload, HealthReport, SyncResult,
};

type Queue<T> = Arc<Mutex<VecDeque<Result<T, ChatdeskError>>>>;

/// Conversation id handed out by the default chat reply.
pub const MOCK_CONVERSATION_ID: &str = "mock-conversation";

/// A scripted backend.
///
/// Each endpoint pops its next outcome from a FIFO queue. When a queue is
/// empty a healthy default is returned:
/// - chat: `"mock response"` with [`MOCK_CONVERSATION_ID`]
/// - escalate: `{"status": "Escalation successful"}`
/// - health: `{"status": "ok"}`
/// - sync: an all-zero summary
pub struct MockBackend {
    chat: Queue<ChatReply>,
    escalations: Queue<serde_json::Value>,
    health: Queue<HealthReport>,
    sync: Queue<SyncResult>,
    history: Arc<Mutex<Vec<ConversationEntry>>>,
    chat_delay: Arc<Mutex<Option<Duration>>>,
    chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
    escalation_requests: Arc<Mutex<Vec<EscalationPayload>>>,
    health_calls: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend where every endpoint succeeds with defaults.
    pub fn new() -> Self {
        Self {
            chat: Arc::new(Mutex::new(VecDeque::new())),
            escalations: Arc::new(Mutex::new(VecDeque::new())),
            health: Arc::new(Mutex::new(VecDeque::new())),
            sync: Arc::new(Mutex::new(VecDeque::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            chat_delay: Arc::new(Mutex::new(None)),
            chat_requests: Arc::new(Mutex::new(Vec::new())),
            escalation_requests: Arc::new(Mutex::new(Vec::new())),
            health_calls: AtomicUsize::new(0),
            sync_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a text reply for the next chat call.
    pub async fn push_text_reply(&self, text: &str, conversation_id: Option<&str>) {
        self.push_chat_reply(Ok(ChatReply {
            message: Some(text.to_string()),
            action: None,
            conversation_id: conversation_id.map(ConversationId::from),
        }))
        .await;
    }

    /// Queue an arbitrary chat outcome.
    pub async fn push_chat_reply(&self, reply: Result<ChatReply, ChatdeskError>) {
        self.chat.lock().await.push_back(reply);
    }

    /// Queue an escalation outcome.
    pub async fn push_escalation(&self, outcome: Result<serde_json::Value, ChatdeskError>) {
        self.escalations.lock().await.push_back(outcome);
    }

    /// Queue a health outcome.
    pub async fn push_health(&self, outcome: Result<HealthReport, ChatdeskError>) {
        self.health.lock().await.push_back(outcome);
    }

    /// Queue a sync outcome.
    pub async fn push_sync(&self, outcome: Result<SyncResult, ChatdeskError>) {
        self.sync.lock().await.push_back(outcome);
    }

    /// Replace the stored history returned for any conversation.
    pub async fn set_history(&self, entries: Vec<ConversationEntry>) {
        *self.history.lock().await = entries;
    }

    /// Make every chat call wait `delay` before answering.
    pub async fn set_chat_delay(&self, delay: Duration) {
        *self.chat_delay.lock().await = Some(delay);
    }

    /// All chat requests received so far.
    pub async fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().await.clone()
    }

    /// All escalation payloads received so far.
    pub async fn escalation_requests(&self) -> Vec<EscalationPayload> {
        self.escalation_requests.lock().await.clone()
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

async fn next<T>(queue: &Queue<T>, default: impl FnOnce() -> T) -> Result<T, ChatdeskError> {
    queue.lock().await.pop_front().unwrap_or_else(|| Ok(default()))
}

#[async_trait]
impl BackendAdapter for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ChatdeskError> {
        self.chat_requests.lock().await.push(request.clone());

        let delay = *self.chat_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        next(&self.chat, || ChatReply {
            message: Some("mock response".to_string()),
            action: None,
            conversation_id: Some(MOCK_CONVERSATION_ID.into()),
        })
        .await
    }

    async fn escalate(
        &self,
        payload: &EscalationPayload,
    ) -> Result<serde_json::Value, ChatdeskError> {
        self.escalation_requests.lock().await.push(payload.clone());
        next(&self.escalations, || json!({ "status": "Escalation successful" })).await
    }

    async fn health(&self) -> Result<HealthReport, ChatdeskError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.health, || HealthReport {
            status: "ok".to_string(),
            version: Some("mock".to_string()),
            timestamp: None,
        })
        .await
    }

    async fn sync_conversations(&self) -> Result<SyncResult, ChatdeskError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.sync, SyncResult::default).await
    }

    async fn conversation_history(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ConversationEntry>, ChatdeskError> {
        tracing::debug!(conversation_id = %conversation_id, "mock history lookup");
        Ok(self.history.lock().await.clone())
    }
}
