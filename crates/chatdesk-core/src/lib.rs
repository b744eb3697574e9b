// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the chatdesk support-chat client.
//!
//! Holds the wire types spoken with the support backend, the session message
//! model, the shared error type, and the [`BackendAdapter`] trait that the
//! HTTP client and the test mocks both implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ChatdeskError;
pub use traits::BackendAdapter;
pub use types::{
    ChatReply, ChatRequest, ConversationEntry, ConversationId, EscalationPayload, HealthReport,
    Message, ReplyAction, Sender, SyncDetail, SyncResult, SyncStatus,
};
