// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the seams between orchestration and I/O.

pub mod backend;

pub use backend::BackendAdapter;
