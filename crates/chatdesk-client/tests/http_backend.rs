// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-level tests for [`HttpBackend`] against a wiremock server.

use std::time::Duration;

use chatdesk_client::HttpBackend;
use chatdesk_config::model::BackendConfig;
use chatdesk_core::{
    BackendAdapter, ChatRequest, ChatdeskError, ConversationId, EscalationPayload, SyncStatus,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::with_base_url(&server.uri()).unwrap()
}

#[tokio::test]
async fn first_chat_message_has_no_conversation_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "hi" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "hello", "conversation_id": "abc" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend(&server)
        .send_message(&ChatRequest::new("hi", None))
        .await
        .unwrap();
    assert_eq!(reply.message.as_deref(), Some("hello"));
    assert_eq!(reply.conversation_id, Some(ConversationId("abc".into())));
}

#[tokio::test]
async fn follow_up_chat_message_carries_conversation_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "message": "and shipping?", "conversation_id": "abc" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "action": "open_real_person_dialog", "conversation_id": "abc" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend(&server)
        .send_message(&ChatRequest::new("and shipping?", Some("abc".into())))
        .await
        .unwrap();
    assert!(reply.requests_escalation());
}

#[tokio::test]
async fn chat_backend_error_is_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "No response from assistant" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server)
        .send_message(&ChatRequest::new("hi", None))
        .await
        .unwrap_err();
    match err {
        ChatdeskError::Backend { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "No response from assistant");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn chat_non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .send_message(&ChatRequest::new("hi", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatdeskError::Decode { .. }), "got: {err:?}");
}

#[tokio::test]
async fn escalation_body_is_exact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/escalate"))
        .and(body_json(json!({
            "message": "need help",
            "conversation_id": "c1",
            "email": "x@y.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Escalation successful" })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = EscalationPayload {
        message: "need help".into(),
        conversation_id: Some("c1".into()),
        email: "x@y.com".into(),
    };
    let response = backend(&server).escalate(&payload).await.unwrap();
    assert_eq!(response["status"], "Escalation successful");
}

#[tokio::test]
async fn escalation_failure_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/escalate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "status": "Escalation failed" })))
        .mount(&server)
        .await;

    let payload = EscalationPayload {
        message: "need help".into(),
        conversation_id: None,
        email: "x@y.com".into(),
    };
    let err = backend(&server).escalate(&payload).await.unwrap_err();
    assert!(matches!(err, ChatdeskError::Backend { status: 500, .. }), "got: {err:?}");
}

#[tokio::test]
async fn health_report_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "version": "0.0.1",
            "timestamp": "2026-10-19T10:00:00"
        })))
        .mount(&server)
        .await;

    let report = backend(&server).health().await.unwrap();
    assert!(report.is_ok());
    assert_eq!(report.version.as_deref(), Some("0.0.1"));
}

#[tokio::test]
async fn slow_health_check_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ok" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = BackendConfig {
        base_url: server.uri(),
        health_timeout_secs: 1,
        ..BackendConfig::default()
    };
    let err = HttpBackend::new(&config).unwrap().health().await.unwrap_err();
    assert!(matches!(err, ChatdeskError::Timeout { .. }), "got: {err:?}");
}

#[tokio::test]
async fn sync_posts_empty_object_and_decodes_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sync/trello"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "success": 1,
            "failed": 0,
            "skipped": 1,
            "details": [
                { "conversation_id": "a", "status": "success", "card_id": "k1", "card_url": "https://trello.com/c/k1" },
                { "conversation_id": "b", "status": "skipped", "reason": "Already saved to Trello" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).sync_conversations().await.unwrap();
    assert_eq!((result.success, result.skipped, result.failed), (1, 1, 0));
    assert_eq!(result.details[0].status, SyncStatus::Success);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn conversation_history_is_fetched_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/conversations/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "role": "user", "content": "hi", "timestamp": "2026-10-19T10:00:00" },
            { "id": 2, "role": "assistant", "content": "hello", "timestamp": "2026-10-19T10:00:02" }
        ])))
        .mount(&server)
        .await;

    let entries = backend(&server)
        .conversation_history(&ConversationId("abc".into()))
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].role, "assistant");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let backend = HttpBackend::with_base_url(&format!("http://{addr}")).unwrap();

    let err = backend.health().await.unwrap_err();
    assert!(matches!(err, ChatdeskError::Transport { .. }), "got: {err:?}");
}
