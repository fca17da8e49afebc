/**
 * Meditation Endpoints
 *
 * Generated meditation scripts, static breathing/guided/music
 * catalogs, session logging with running user statistics, and
 * reminder preferences.
 *
 * Statistics are running sums in a single per-user document. The
 * streak compares the previous session's calendar date with today's;
 * a gap of at most one day extends the streak, anything longer resets
 * it to one.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ai::language::PIVOT_LANGUAGE;
use crate::error::ApiError;
use crate::meditation::content;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::server::state::AppState;
use crate::store::{fields, Fields};

pub const SESSIONS_COLLECTION: &str = "meditation_sessions";
pub const STATS_COLLECTION: &str = "user_stats";
pub const HISTORY_COLLECTION: &str = "meditation_history";
pub const REMINDERS_COLLECTION: &str = "meditation_reminders";

#[derive(Deserialize, Debug)]
pub struct ScriptRequest {
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_focus")]
    pub focus: String,
    #[serde(default)]
    pub language: Option<String>,
}

fn default_duration() -> u32 {
    5
}

fn default_focus() -> String {
    "general".to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ScriptResponse {
    pub script: String,
    pub duration: u32,
    pub focus: String,
    pub audio_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SessionLogRequest {
    pub duration: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub mood_before: Option<i64>,
    #[serde(default)]
    pub mood_after: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct BreathingParams {
    #[serde(rename = "type", default = "default_breathing")]
    pub kind: String,
}

fn default_breathing() -> String {
    "4-7-8".to_string()
}

/// Generate a personalized meditation script
///
/// Generation and translation both degrade to defaults, so this
/// endpoint always returns a usable script.
pub async fn generate_script(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(request): Json<ScriptRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    let mut script = state
        .ai
        .generate_meditation_script(request.duration, &request.focus)
        .await;

    let language = request.language.as_deref().unwrap_or(PIVOT_LANGUAGE);
    if language != PIVOT_LANGUAGE {
        script = state
            .ai
            .translate(&script, language, Some(PIVOT_LANGUAGE))
            .await;
    }

    if let Some(claims) = &claims {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let doc = fields([
            ("user_id", json!(claims.sub)),
            ("script", json!(script)),
            ("duration", json!(request.duration)),
            ("focus", json!(request.focus)),
            ("language", json!(language)),
            ("timestamp", json!(timestamp)),
        ]);
        let id = format!("script_{}_{timestamp}", claims.sub);
        state.store.save(HISTORY_COLLECTION, &id, doc).await?;
    }

    Ok(Json(ScriptResponse {
        script,
        duration: request.duration,
        focus: request.focus,
        audio_url: None,
    }))
}

/// Get a guided breathing exercise
pub async fn get_breathing_exercise(Query(params): Query<BreathingParams>) -> Json<Value> {
    Json(json!({
        "exercise": content::breathing_exercise(&params.kind),
        "tip": "Practice in a quiet, comfortable place. Stop if you feel dizzy.",
    }))
}

/// List guided meditation options
pub async fn get_guided_meditations() -> Json<Value> {
    Json(json!({
        "meditations": content::guided_meditations(),
        "recommendation": "Start with shorter sessions and gradually increase duration as you build your practice.",
    }))
}

/// List therapeutic music recommendations
pub async fn get_meditation_music() -> Json<Value> {
    Json(json!({
        "tracks": content::music_tracks(),
        "message": "AI-generated therapeutic music coming soon",
    }))
}

/// Log a completed meditation session and update running stats
pub async fn log_session(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(session): Json<SessionLogRequest>,
) -> Result<Json<Value>, ApiError> {
    let mood_improvement = match (session.mood_before, session.mood_after) {
        (Some(before), Some(after)) => Some(after - before),
        _ => None,
    };

    let timestamp = chrono::Utc::now().to_rfc3339();
    let session_id = format!("session_{}_{timestamp}", claims.sub);

    let doc = fields([
        ("user_id", json!(claims.sub)),
        ("duration", json!(session.duration)),
        ("type", json!(session.kind)),
        ("mood_before", json!(session.mood_before)),
        ("mood_after", json!(session.mood_after)),
        ("mood_improvement", json!(mood_improvement)),
        ("notes", json!(session.notes)),
        ("timestamp", json!(timestamp)),
    ]);
    state.store.save(SESSIONS_COLLECTION, &session_id, doc).await?;

    let stats = state.store.get(STATS_COLLECTION, &claims.sub).await?;

    let (mut total_sessions, mut total_minutes, prev_streak, prev_last_session) = match &stats {
        Some(doc) => (
            int_of(doc, "total_sessions"),
            int_of(doc, "total_minutes"),
            int_of(doc, "streak_days"),
            doc.get("last_session")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        None => (0, 0, 0, None),
    };

    total_sessions += 1;
    total_minutes += session.duration;

    // The previous session date decides the streak; it must be read
    // before last_session is overwritten with the current time
    let streak_days = match prev_last_session.as_deref().and_then(parse_session_date) {
        Some(last_date) => {
            let today = chrono::Utc::now().date_naive();
            let gap = (today - last_date).num_days();
            if gap <= 1 {
                prev_streak + 1
            } else {
                1
            }
        }
        None => 1,
    };

    let updated = fields([
        ("total_sessions", json!(total_sessions)),
        ("total_minutes", json!(total_minutes)),
        ("streak_days", json!(streak_days)),
        ("last_session", json!(timestamp)),
    ]);
    state.store.save(STATS_COLLECTION, &claims.sub, updated).await?;

    tracing::info!(
        "Meditation session logged for user {} (streak {streak_days})",
        claims.sub
    );

    Ok(Json(json!({
        "message": "Session logged successfully",
        "session_id": session_id,
        "stats": {
            "total_sessions": total_sessions,
            "total_minutes": total_minutes,
            "streak_days": streak_days,
            "mood_improvement": mood_improvement,
        },
    })))
}

/// Get the current user's meditation statistics
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let Some(stats) = state.store.get(STATS_COLLECTION, &claims.sub).await? else {
        return Ok(Json(json!({
            "total_sessions": 0,
            "total_minutes": 0,
            "streak_days": 0,
            "average_session_length": 0.0,
            "favorite_type": null,
            "mood_improvement_average": 0.0,
        })));
    };

    let total_sessions = int_of(&stats, "total_sessions");
    let total_minutes = int_of(&stats, "total_minutes");

    let filter = fields([("user_id", json!(claims.sub))]);
    let recent = state.store.query(SESSIONS_COLLECTION, &filter, 30).await?;

    let mut type_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    let mut mood_improvements: Vec<i64> = Vec::new();

    for session in &recent {
        let kind = session
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        *type_counts.entry(kind).or_insert(0) += 1;
        if let Some(improvement) = session.get("mood_improvement").and_then(Value::as_i64) {
            mood_improvements.push(improvement);
        }
    }

    let favorite_type = type_counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(kind, _)| kind);

    let average_session_length = if total_sessions > 0 {
        round1(total_minutes as f64 / total_sessions as f64)
    } else {
        0.0
    };

    let mood_improvement_average = if mood_improvements.is_empty() {
        0.0
    } else {
        round1(mood_improvements.iter().sum::<i64>() as f64 / mood_improvements.len() as f64)
    };

    Ok(Json(json!({
        "total_sessions": total_sessions,
        "total_minutes": total_minutes,
        "streak_days": int_of(&stats, "streak_days"),
        "average_session_length": average_session_length,
        "favorite_type": favorite_type,
        "mood_improvement_average": mood_improvement_average,
        "last_session": stats.get("last_session").cloned().unwrap_or(Value::Null),
    })))
}

/// Get meditation reminder preferences, with defaults when unset
pub async fn get_reminders(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let reminders = state.store.get(REMINDERS_COLLECTION, &claims.sub).await?;

    let reminders = reminders.map(Value::Object).unwrap_or_else(|| {
        json!({
            "enabled": false,
            "times": ["08:00", "20:00"],
            "days": ["mon", "tue", "wed", "thu", "fri", "sat", "sun"],
            "message": "Time for your daily meditation practice",
        })
    });

    Ok(Json(reminders))
}

fn int_of(doc: &Fields, key: &str) -> i64 {
    doc.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_session_date(timestamp: &str) -> Option<chrono::NaiveDate> {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.date_naive())
}
