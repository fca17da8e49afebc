/**
 * Chat Orchestration Pipeline
 *
 * The request-time sequence behind the companion chat endpoint:
 * resolve the caller's preferred language, detect the message's
 * language, translate to the pivot language for generation, assemble
 * recent conversation context, generate a reply, translate it back,
 * run crisis detection on the original message, and persist the turn
 * for authenticated callers.
 *
 * The pipeline holds no state between requests. Anonymous callers skip
 * context retrieval and persistence; every step before those is
 * identical.
 */

use serde_json::{json, Value};

use crate::ai::language::{Sentiment, PIVOT_LANGUAGE};
use crate::ai::ContextTurn;
use crate::auth::sessions::Claims;
use crate::auth::users::get_by_id;
use crate::crisis::resources::chat_helplines;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::store::fields;

pub const CHAT_COLLECTION: &str = "chat_messages";

/// Prior turns fetched from history
const CONTEXT_FETCH_LIMIT: usize = 10;
/// Most recent turns actually passed to the model
const CONTEXT_WINDOW: usize = 5;

/// Result of one pipeline run
#[derive(Debug)]
pub struct ChatOutcome {
    pub response: String,
    pub original_language: String,
    pub detected_language: String,
    pub sentiment: Sentiment,
    pub session_id: Option<String>,
    pub is_crisis: bool,
}

/// Run the full chat pipeline for one message
pub async fn run_chat_pipeline(
    state: &AppState,
    claims: Option<&Claims>,
    message: &str,
    requested_language: Option<&str>,
) -> Result<ChatOutcome, ApiError> {
    // Language claimed by the request, overridden by the stored profile
    let mut user_language = requested_language.unwrap_or(PIVOT_LANGUAGE).to_string();
    if let Some(claims) = claims {
        if let Some(record) = get_by_id(state.store.as_ref(), &claims.sub).await? {
            user_language = record.preferred_language;
        }
    }

    let detected_language = state.ai.detect_language(message).await;
    tracing::debug!("Detected language: {detected_language}");

    // Generation runs in the pivot language
    let message_for_ai = if detected_language != PIVOT_LANGUAGE {
        state
            .ai
            .translate(message, PIVOT_LANGUAGE, Some(&detected_language))
            .await
    } else {
        message.to_string()
    };

    let context = match claims {
        Some(claims) => fetch_context(state, &claims.sub).await?,
        None => Vec::new(),
    };

    let reply = state.ai.generate_reply(&message_for_ai, &context).await;

    let mut final_response = if user_language != PIVOT_LANGUAGE {
        state
            .ai
            .translate(&reply, &user_language, Some(PIVOT_LANGUAGE))
            .await
    } else {
        reply
    };

    // Crisis detection runs on the original message, not the translation
    let verdict = state.ai.detect_crisis(message).await;
    if verdict.is_crisis {
        tracing::warn!("Crisis indicators in chat message (confidence {})", verdict.confidence);
        final_response.push_str(
            "\n\nI want you to know that you don't have to go through this alone. \
             If you need immediate support, these helplines have caring professionals \
             ready to help:",
        );
        for helpline in chat_helplines().iter().take(2) {
            final_response.push_str(&format!(
                "\n- {}: {} ({})",
                helpline.name, helpline.number, helpline.available
            ));
        }
    }

    let sentiment = state.ai.analyze_sentiment(message).await;

    let session_id = match claims {
        Some(claims) => Some(
            persist_turn(
                state,
                &claims.sub,
                message,
                &final_response,
                &detected_language,
                &user_language,
                &sentiment,
                verdict.is_crisis,
            )
            .await?,
        ),
        None => None,
    };

    Ok(ChatOutcome {
        response: final_response,
        original_language: user_language,
        detected_language,
        sentiment,
        session_id,
        is_crisis: verdict.is_crisis,
    })
}

/// Fetch the caller's recent turns, newest last, windowed for the model
async fn fetch_context(state: &AppState, uid: &str) -> Result<Vec<ContextTurn>, ApiError> {
    let filter = fields([("user_id", json!(uid))]);
    let mut rows = state
        .store
        .query(CHAT_COLLECTION, &filter, CONTEXT_FETCH_LIMIT)
        .await?;

    rows.sort_by(|a, b| timestamp_of(a).cmp(&timestamp_of(b)));

    let context = rows
        .iter()
        .rev()
        .take(CONTEXT_WINDOW)
        .rev()
        .map(|row| ContextTurn {
            user: str_of(row, "user_message"),
            assistant: str_of(row, "ai_response"),
        })
        .collect();

    Ok(context)
}

#[allow(clippy::too_many_arguments)]
async fn persist_turn(
    state: &AppState,
    uid: &str,
    message: &str,
    response: &str,
    detected_language: &str,
    user_language: &str,
    sentiment: &Sentiment,
    is_crisis: bool,
) -> Result<String, ApiError> {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let session_id = format!("session_{uid}_{timestamp}");

    let doc = fields([
        ("user_id", json!(uid)),
        ("user_message", json!(message)),
        ("ai_response", json!(response)),
        ("detected_language", json!(detected_language)),
        ("user_language", json!(user_language)),
        ("sentiment", json!(sentiment)),
        ("is_crisis", json!(is_crisis)),
        ("timestamp", json!(timestamp)),
    ]);

    state.store.save(CHAT_COLLECTION, &session_id, doc).await?;

    Ok(session_id)
}

fn str_of(row: &crate::store::Fields, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamp_of(row: &crate::store::Fields) -> String {
    str_of(row, "timestamp")
}
