// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-handoff triggers, UI events, and the escalation payload.

use std::time::Duration;

use chatdesk_core::EscalationPayload;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::ConversationSession;

/// Bot message appended when the backend asks for a human.
pub const HANDOFF_MESSAGE: &str =
    "It seems I'm unable to help you with this. Let me connect you to a human.";

/// Bot message appended after a successful escalation.
pub const THANK_YOU_MESSAGE: &str = "Thank you for your message. We will get back to you shortly.";

/// Payload text used when escalating an empty session.
pub const NO_LAST_MESSAGE: &str = "No last message";

/// Notifications the store sends to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Show the contact prompt; answer with [`MessageStore::escalate_to_human`].
    ///
    /// [`MessageStore::escalate_to_human`]: crate::MessageStore::escalate_to_human
    OpenEscalationDialog,
    /// Restart the session: reset it and run the boot sequence again.
    Reload,
}

/// How a completed escalation dialog ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationOutcome {
    /// No contact given; nothing was sent.
    Cancelled,
    /// The backend accepted the handoff.
    Sent,
    /// The request failed. Only logged; the session is untouched.
    Failed,
}

/// Case-insensitive substring matcher for phrases that ask for a human.
#[derive(Debug, Clone)]
pub struct EscalationTrigger {
    keywords: Vec<String>,
}

impl EscalationTrigger {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The first keyword contained in `content`, if any.
    pub fn find(&self, content: &str) -> Option<&str> {
        let content = content.to_lowercase();
        self.keywords
            .iter()
            .find(|k| content.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, content: &str) -> bool {
        self.find(content).is_some()
    }
}

/// Builds the handoff request from the last stored message.
pub fn build_payload(session: &ConversationSession, contact: &str) -> EscalationPayload {
    EscalationPayload {
        message: session
            .last_message()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| NO_LAST_MESSAGE.to_string()),
        conversation_id: session.conversation_id().cloned(),
        email: contact.to_string(),
    }
}

/// Emits `event` after `delay` on a detached task.
pub(crate) fn schedule(
    events: &mpsc::UnboundedSender<SessionEvent>,
    event: SessionEvent,
    delay: Duration,
) -> JoinHandle<()> {
    let events = events.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if events.send(event).is_err() {
            debug!(?event, "session event dropped, no UI listening");
        }
    })
}
