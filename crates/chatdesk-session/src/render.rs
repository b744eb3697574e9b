// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display helpers for bot text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Assistant citation markers such as `【4:0†source】`.
static SOURCE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】").expect("source marker pattern is valid"));

/// Removes every citation marker from `text`.
pub fn strip_sources(text: &str) -> Cow<'_, str> {
    SOURCE_MARKER.replace_all(text, "")
}
