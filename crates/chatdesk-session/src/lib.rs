// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for the chatdesk client.
//!
//! [`MessageStore`] owns the session and drives the chat and escalation
//! flows; [`BootSequence`] runs the health probe and the background sync.
//! Both talk to the backend only through [`chatdesk_core::BackendAdapter`].

pub mod boot;
pub mod escalation;
pub mod health;
pub mod language;
pub mod render;
pub mod session;
pub mod store;
pub mod sync;

pub use boot::{BootReport, BootSequence};
pub use escalation::{
    EscalationOutcome, EscalationTrigger, HANDOFF_MESSAGE, NO_LAST_MESSAGE, SessionEvent,
    THANK_YOU_MESSAGE,
};
pub use health::check_health;
pub use language::Language;
pub use render::strip_sources;
pub use session::{ConversationSession, SessionState};
pub use store::{FALLBACK_MESSAGE, MessageStore};
pub use sync::{log_sync_result, spawn_background_sync, trigger_sync};
