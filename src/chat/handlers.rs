/**
 * Chat Endpoints
 *
 * The companion chat surface: send a message (anonymous or
 * authenticated), read history, delete a single turn, or clear all
 * history. Message sending delegates to the orchestration pipeline.
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ai::language::Sentiment;
use crate::chat::pipeline::{run_chat_pipeline, CHAT_COLLECTION};
use crate::error::ApiError;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::server::state::AppState;
use crate::store::{fields, DEFAULT_QUERY_LIMIT};

#[derive(Deserialize, Debug)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatMessageResponse {
    pub response: String,
    pub original_language: String,
    pub detected_language: String,
    pub sentiment: Sentiment,
    pub session_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatHistoryResponse {
    pub messages: Vec<Value>,
    pub total_count: usize,
}

#[derive(Deserialize, Debug)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    50
}

/// Send a message to the chat companion
pub async fn send_message(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message cannot be empty"));
    }

    let outcome = run_chat_pipeline(
        &state,
        claims.as_ref(),
        &request.message,
        request.language.as_deref(),
    )
    .await?;

    Ok(Json(ChatMessageResponse {
        response: outcome.response,
        original_language: outcome.original_language,
        detected_language: outcome.detected_language,
        sentiment: outcome.sentiment,
        session_id: outcome.session_id,
    }))
}

/// Get chat history for the current user, newest first
pub async fn get_chat_history(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    let filter = fields([("user_id", json!(claims.sub))]);
    let limit = params.limit.min(DEFAULT_QUERY_LIMIT);

    let mut rows = state.store.query(CHAT_COLLECTION, &filter, limit).await?;

    rows.sort_by(|a, b| timestamp_of(b).cmp(&timestamp_of(a)));

    let total_count = rows.len();
    let messages = rows.into_iter().map(Value::Object).collect();

    Ok(Json(ChatHistoryResponse {
        messages,
        total_count,
    }))
}

/// Delete one chat turn owned by the current user
pub async fn delete_chat_message(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let message = state.store.get(CHAT_COLLECTION, &session_id).await?;

    // Ownership check doubles as existence check so foreign ids look absent
    let owned = message
        .as_ref()
        .and_then(|doc| doc.get("user_id"))
        .and_then(Value::as_str)
        .map(|uid| uid == claims.sub)
        .unwrap_or(false);

    if !owned {
        return Err(ApiError::not_found("Message not found"));
    }

    state.store.delete(CHAT_COLLECTION, &session_id).await?;

    Ok(Json(json!({"message": "Chat message deleted successfully"})))
}

/// Clear all chat history for the current user
pub async fn clear_chat_history(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let filter = fields([("user_id", json!(claims.sub))]);
    let rows = state.store.query(CHAT_COLLECTION, &filter, 1000).await?;

    let mut deleted_count = 0usize;
    for row in &rows {
        if let Some(id) = row.get("id").and_then(Value::as_str) {
            if state.store.delete(CHAT_COLLECTION, id).await? {
                deleted_count += 1;
            }
        }
    }

    tracing::info!("Cleared {deleted_count} chat messages for user {}", claims.sub);

    Ok(Json(json!({
        "message": "Chat history cleared successfully",
        "deleted_count": deleted_count,
    })))
}

fn timestamp_of(row: &crate::store::Fields) -> String {
    row.get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
