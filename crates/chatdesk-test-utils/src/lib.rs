// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for chatdesk integration tests.
//!
//! Provides a scripted in-memory backend so the message store, the boot
//! sequence, and the shell can be exercised without a running service.
//!
//! # Components
//!
//! - [`MockBackend`] - Backend adapter with queued replies and captured requests

pub mod mock_backend;

pub use mock_backend::MockBackend;
