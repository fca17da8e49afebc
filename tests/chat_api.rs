//! Chat API integration tests
//!
//! With no model or translation endpoints configured, the pipeline
//! degrades to the fixed apology reply, English detection, and a
//! neutral sentiment reading. These tests pin the orchestration and
//! persistence behavior around those defaults.

mod common;

use axum::http::StatusCode;
use common::{bearer, signup, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_anonymous_chat_returns_reply_without_persisting() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/chat/message")
        .json(&serde_json::json!({"message": "I feel a bit stressed today"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["response"].as_str().is_some());
    assert_eq!(body["detected_language"], "en");
    assert_eq!(body["sentiment"]["sentiment"], "neutral");
    assert!(body["session_id"].is_null());

    // Anonymous turns never reach storage
    assert_eq!(app.store.len("chat_messages").await, 0);
}

#[tokio::test]
async fn test_authenticated_chat_persists_turn() {
    let app = TestApp::new();
    let token = signup(&app, "chat@example.com").await;

    let response = app
        .server
        .post("/api/chat/message")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"message": "Hello there"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let session_id = body["session_id"].as_str().expect("session id expected");
    assert!(session_id.starts_with("session_"));

    assert_eq!(app.store.len("chat_messages").await, 1);
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/chat/message")
        .json(&serde_json::json!({"message": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_crisis_message_appends_helplines() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/chat/message")
        .json(&serde_json::json!({"message": "I feel worthless and alone"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let reply = body["response"].as_str().unwrap();
    assert!(reply.contains("NIMHANS"));
    assert!(reply.contains("080-46110007"));
}

#[tokio::test]
async fn test_history_requires_auth() {
    let app = TestApp::new();

    let response = app.server.get("/api/chat/history").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_history_returns_own_messages_newest_first() {
    let app = TestApp::new();
    let token = signup(&app, "chat@example.com").await;

    for message in ["first message", "second message"] {
        app.server
            .post("/api/chat/message")
            .add_header("Authorization", bearer(&token))
            .json(&serde_json::json!({"message": message}))
            .await;
    }

    let response = app
        .server
        .get("/api/chat/history")
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_count"], 2);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["user_message"], "second message");
    assert_eq!(messages[1]["user_message"], "first message");
}

#[tokio::test]
async fn test_delete_single_message() {
    let app = TestApp::new();
    let token = signup(&app, "chat@example.com").await;

    let sent = app
        .server
        .post("/api/chat/message")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"message": "delete me"}))
        .await;
    let body: serde_json::Value = sent.json();
    let session_id = body["session_id"].as_str().unwrap();

    let response = app
        .server
        .delete(&format!("/api/chat/history/{session_id}"))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.store.len("chat_messages").await, 0);
}

#[tokio::test]
async fn test_delete_foreign_message_reads_as_missing() {
    let app = TestApp::new();
    let owner = signup(&app, "owner@example.com").await;
    let intruder = signup(&app, "intruder@example.com").await;

    let sent = app
        .server
        .post("/api/chat/message")
        .add_header("Authorization", bearer(&owner))
        .json(&serde_json::json!({"message": "private"}))
        .await;
    let body: serde_json::Value = sent.json();
    let session_id = body["session_id"].as_str().unwrap();

    let response = app
        .server
        .delete(&format!("/api/chat/history/{session_id}"))
        .add_header("Authorization", bearer(&intruder))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.len("chat_messages").await, 1);
}

#[tokio::test]
async fn test_clear_history_reports_deleted_count() {
    let app = TestApp::new();
    let token = signup(&app, "chat@example.com").await;

    for message in ["one", "two", "three"] {
        app.server
            .post("/api/chat/message")
            .add_header("Authorization", bearer(&token))
            .json(&serde_json::json!({"message": message}))
            .await;
    }

    let response = app
        .server
        .delete("/api/chat/history")
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["deleted_count"], 3);
    assert_eq!(app.store.len("chat_messages").await, 0);
}
