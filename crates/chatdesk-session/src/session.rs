// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory conversation owned by the message store.

use chatdesk_core::{ConversationId, Message, Sender};
use strum::Display;

/// Whether the backend has assigned a conversation id yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionState {
    /// No conversation id; the next chat request starts a new conversation.
    Idle,
    /// A conversation id is threaded through every request.
    Active,
}

/// Messages plus the active conversation id.
///
/// Observers receive clones of this value; only [`MessageStore`] mutates it.
///
/// [`MessageStore`]: crate::MessageStore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    conversation_id: Option<ConversationId>,
    messages: Vec<Message>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.conversation_id.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    /// Id the next appended message will get.
    pub fn next_id(&self) -> u64 {
        self.messages.len() as u64 + 1
    }

    /// Appends a message with `id = len + 1`.
    pub(crate) fn push(&mut self, from: Sender, content: impl Into<String>) {
        self.push_message(Message::new(0, from, content));
    }

    /// Appends `message`, renumbering it to `len + 1`.
    pub(crate) fn push_message(&mut self, mut message: Message) {
        message.id = self.next_id();
        self.messages.push(message);
    }

    /// Adopts a backend-issued id. `None` keeps the current one.
    pub(crate) fn adopt_conversation_id(&mut self, id: Option<ConversationId>) {
        if let Some(id) = id {
            self.conversation_id = Some(id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.conversation_id = None;
        self.messages.clear();
    }
}
