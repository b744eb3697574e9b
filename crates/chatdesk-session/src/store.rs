// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message store: sole owner of the conversation session.
//!
//! Every mutation happens inside one `watch::Sender::send_modify` call, so
//! subscribers only ever observe committed snapshots. Backend calls are made
//! outside of any borrow and their result is applied afterwards.

use std::sync::Arc;
use std::time::Duration;

use chatdesk_config::model::SessionConfig;
use chatdesk_core::{BackendAdapter, ChatReply, ChatRequest, ConversationId, Message, Sender};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::escalation::{
    self, EscalationOutcome, EscalationTrigger, SessionEvent, HANDOFF_MESSAGE, THANK_YOU_MESSAGE,
};
use crate::session::ConversationSession;

/// Bot message appended when a chat request fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again later.";

/// Shared conversation state plus the chat and escalation flows that feed it.
pub struct MessageStore {
    backend: Arc<dyn BackendAdapter>,
    session: watch::Sender<ConversationSession>,
    events: mpsc::UnboundedSender<SessionEvent>,
    trigger: EscalationTrigger,
    escalation_delay: Duration,
    reload_delay: Duration,
}

impl MessageStore {
    /// Creates the store and the receiving end of its UI event channel.
    pub fn new(
        backend: Arc<dyn BackendAdapter>,
        config: &SessionConfig,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (session, _) = watch::channel(ConversationSession::new());
        let store = Self {
            backend,
            session,
            events,
            trigger: EscalationTrigger::new(&config.escalation_keywords),
            escalation_delay: config.escalation_delay(),
            reload_delay: config.reload_delay(),
        };
        (Arc::new(store), events_rx)
    }

    /// Subscribe to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ConversationSession> {
        self.session.subscribe()
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> ConversationSession {
        self.session.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.session.borrow().messages().to_vec()
    }

    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.session.borrow().conversation_id().cloned()
    }

    pub fn add_user_message(&self, content: &str) -> Message {
        self.append(Sender::User, content)
    }

    pub fn add_bot_message(&self, content: &str) -> Message {
        self.append(Sender::Bot, content)
    }

    fn append(&self, from: Sender, content: &str) -> Message {
        let mut message = Message::new(0, from, content);
        self.session.send_modify(|session| {
            message.id = session.next_id();
            session.push_message(message.clone());
        });
        message
    }

    /// Handles one user utterance.
    ///
    /// Messages naming an escalation keyword open the escalation dialog after
    /// the configured delay and never reach the backend. Everything else is
    /// sent with the current conversation id; failures become the fallback
    /// bot message.
    pub async fn add_message(&self, content: &str) {
        self.add_user_message(content);

        if let Some(keyword) = self.trigger.find(content) {
            info!(keyword, "escalation keyword detected");
            escalation::schedule(
                &self.events,
                SessionEvent::OpenEscalationDialog,
                self.escalation_delay,
            );
            return;
        }

        let request = ChatRequest::new(content, self.conversation_id());
        match self.backend.send_message(&request).await {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => {
                error!(error = %e, "chat request failed");
                self.add_bot_message(FALLBACK_MESSAGE);
            }
        }
    }

    fn apply_reply(&self, reply: ChatReply) {
        let escalate = reply.requests_escalation();
        let ChatReply {
            message,
            conversation_id,
            ..
        } = reply;

        self.session.send_modify(|session| {
            session.adopt_conversation_id(conversation_id);
            if escalate {
                session.push(Sender::Bot, HANDOFF_MESSAGE);
            } else if let Some(text) = message {
                session.push(Sender::Bot, text);
            }
        });

        if escalate {
            info!("backend requested a human handoff");
            escalation::schedule(
                &self.events,
                SessionEvent::OpenEscalationDialog,
                self.escalation_delay,
            );
        } else {
            debug!("chat reply applied");
        }
    }

    /// Sends a language instruction without showing it as a user message.
    pub async fn set_language_preference(&self, instruction: &str) {
        let request = ChatRequest::new(instruction, self.conversation_id());
        match self.backend.send_message(&request).await {
            Ok(reply) => self.session.send_modify(|session| {
                session.adopt_conversation_id(reply.conversation_id);
                if let Some(text) = reply.message {
                    session.push(Sender::Bot, text);
                }
            }),
            Err(e) => {
                error!(error = %e, "language change request failed");
                self.add_bot_message(FALLBACK_MESSAGE);
            }
        }
    }

    /// Clears all messages and the conversation id.
    pub fn reset_messages(&self) {
        self.session.send_modify(ConversationSession::clear);
        info!("conversation reset");
    }

    /// Opens the escalation dialog right away (menu entry).
    pub fn open_escalation_dialog(&self) {
        if self.events.send(SessionEvent::OpenEscalationDialog).is_err() {
            debug!("escalation dialog requested with no UI listening");
        }
    }

    /// Completes the escalation dialog with the contact the user entered.
    ///
    /// `None` or a blank contact cancels. On success the thank-you message is
    /// appended and a reload is scheduled; on failure the error is only
    /// logged.
    pub async fn escalate_to_human(&self, contact: Option<&str>) -> EscalationOutcome {
        let Some(contact) = contact.map(str::trim).filter(|c| !c.is_empty()) else {
            debug!("escalation dialog cancelled");
            return EscalationOutcome::Cancelled;
        };

        let payload = escalation::build_payload(&self.session.borrow(), contact);
        match self.backend.escalate(&payload).await {
            Ok(response) => {
                info!(response = %response, "escalation sent");
                self.add_bot_message(THANK_YOU_MESSAGE);
                escalation::schedule(&self.events, SessionEvent::Reload, self.reload_delay);
                EscalationOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, "escalation failed");
                EscalationOutcome::Failed
            }
        }
    }
}
