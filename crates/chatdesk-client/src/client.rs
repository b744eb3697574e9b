// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-over-HTTP plumbing for the support backend.
//!
//! [`BackendClient`] owns the pooled `reqwest` client, resolves endpoint
//! paths against the configured base URL, and maps every failure mode onto
//! [`ChatdeskError`]. It never retries.

use std::time::Duration;

use chatdesk_core::ChatdeskError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CHAT_PATH: &str = "/api/chat";
pub const ESCALATE_PATH: &str = "/api/escalate";
pub const HEALTH_PATH: &str = "/api/health";
pub const SYNC_PATH: &str = "/api/sync/trello";
pub const CONVERSATIONS_PATH: &str = "/api/conversations";

/// Error body the backend sends alongside 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: String,
}

/// Low-level HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl BackendClient {
    /// Creates a client for `base_url` with a default per-request timeout.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ChatdeskError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ChatdeskError::Config(format!("invalid backend base URL `{base_url}`: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ChatdeskError::transport("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            request_timeout,
        })
    }

    /// The normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an absolute endpoint path (`/api/...`) against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ChatdeskError> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ChatdeskError::Internal(format!("invalid endpoint URL for {path}: {e}")))
    }

    /// Like [`endpoint`](Self::endpoint), with one extra percent-encoded path segment.
    pub fn endpoint_with_segment(&self, path: &str, segment: &str) -> Result<Url, ChatdeskError> {
        let mut url = self.endpoint(path)?;
        let shown = url.to_string();
        url.path_segments_mut()
            .map_err(|()| ChatdeskError::Internal(format!("base URL cannot carry a path: {shown}")))?
            .push(segment);
        Ok(url)
    }

    /// `GET` a JSON document. `timeout` overrides the client default.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Option<Duration>,
    ) -> Result<T, ChatdeskError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let body = self.execute(request, timeout).await?;
        decode(&body)
    }

    /// `POST` a JSON body and decode a JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ChatdeskError> {
        let body = self.post_raw(url, body).await?;
        decode(&body)
    }

    /// `POST` a JSON body and return the raw reply text.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<String, ChatdeskError> {
        self.execute(self.client.post(url).json(body), None).await
    }

    /// Sends the request, returning the body of a 2xx response.
    async fn execute(
        &self,
        request: RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<String, ChatdeskError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ChatdeskError::Timeout {
                    duration: timeout.unwrap_or(self.request_timeout),
                }
            } else {
                ChatdeskError::transport(format!("HTTP request failed: {e}"), e)
            }
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        debug!(status = %status, path = %url, "backend response received");

        let body = response
            .text()
            .await
            .map_err(|e| ChatdeskError::transport(format!("failed to read response body: {e}"), e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status, &body))
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ChatdeskError> {
    serde_json::from_str(body)
        .map_err(|e| ChatdeskError::decode(format!("unexpected response body: {e}"), e))
}

/// Builds the error for a non-2xx status, preferring the backend's `{"error": ...}` text.
fn status_error(status: StatusCode, body: &str) -> ChatdeskError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => api_err.error,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    ChatdeskError::Backend {
        status: status.as_u16(),
        message,
    }
}
