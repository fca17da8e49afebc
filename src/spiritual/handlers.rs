/**
 * Spiritual Endpoints
 *
 * Daily quotes, personalized guidance, scripture lookup, practice and
 * affirmation catalogs, and curated videos. Quote generation degrades
 * to a fixed default so the endpoint never fails.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::OptionalAuthUser;
use crate::server::state::AppState;
use crate::spiritual::content;
use crate::store::fields;

pub const SPIRITUAL_HISTORY_COLLECTION: &str = "spiritual_history";
pub const SPIRITUAL_GUIDANCE_COLLECTION: &str = "spiritual_guidance";

#[derive(Deserialize, Debug)]
pub struct QuoteParams {
    #[serde(default = "default_tradition")]
    pub tradition: String,
}

fn default_tradition() -> String {
    "universal".to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuoteResponse {
    pub quote: String,
    pub source: Option<String>,
    pub tradition: Option<String>,
    pub reflection: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GuidanceRequest {
    pub concern: String,
    #[serde(default = "default_tradition")]
    pub tradition: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GuidanceResponse {
    pub guidance: String,
    pub tradition: String,
    pub practices: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct ScriptureParams {
    pub topic: String,
    #[serde(default = "default_all")]
    pub tradition: String,
}

fn default_all() -> String {
    "all".to_string()
}

#[derive(Deserialize, Debug)]
pub struct PracticeParams {
    #[serde(default = "default_goal")]
    pub goal: String,
}

fn default_goal() -> String {
    "peace".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AffirmationParams {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_focus")]
    pub focus: String,
}

fn default_count() -> usize {
    5
}

fn default_focus() -> String {
    "general".to_string()
}

/// Get a daily spiritual quote
pub async fn get_spiritual_quote(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Query(params): Query<QuoteParams>,
) -> Json<QuoteResponse> {
    let wisdom = state.ai.generate_spiritual_wisdom(&params.tradition).await;
    let (quote, source, reflection) = parse_wisdom(&wisdom);

    if let Some(claims) = &claims {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let doc = fields([
            ("user_id", json!(claims.sub)),
            ("quote", json!(quote)),
            ("source", json!(source)),
            ("tradition", json!(params.tradition)),
            ("timestamp", json!(timestamp)),
        ]);
        let id = format!("quote_{}_{timestamp}", claims.sub);
        if let Err(e) = state.store.save(SPIRITUAL_HISTORY_COLLECTION, &id, doc).await {
            tracing::error!("Failed to save quote history: {e}");
            return Json(QuoteResponse {
                quote: "In the midst of movement and chaos, keep stillness inside of you."
                    .to_string(),
                source: Some("Deepak Chopra".to_string()),
                tradition: Some("universal".to_string()),
                reflection: Some("Find your inner peace amidst life's challenges.".to_string()),
            });
        }
    }

    Json(QuoteResponse {
        quote,
        source,
        tradition: Some(params.tradition),
        reflection,
    })
}

/// Get personalized spiritual guidance
pub async fn get_spiritual_guidance(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(request): Json<GuidanceRequest>,
) -> Result<Json<GuidanceResponse>, ApiError> {
    let guidance = state
        .ai
        .generate_spiritual_guidance(&request.concern, &request.tradition)
        .await;

    if let Some(claims) = &claims {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let doc = fields([
            ("user_id", json!(claims.sub)),
            ("concern", json!(request.concern)),
            ("tradition", json!(request.tradition)),
            ("guidance", json!(guidance)),
            ("timestamp", json!(timestamp)),
        ]);
        let id = format!("guidance_{}_{timestamp}", claims.sub);
        state
            .store
            .save(SPIRITUAL_GUIDANCE_COLLECTION, &id, doc)
            .await?;
    }

    Ok(Json(GuidanceResponse {
        guidance,
        tradition: request.tradition,
        practices: vec![
            "Daily meditation".to_string(),
            "Gratitude journaling".to_string(),
            "Mindful breathing".to_string(),
        ],
    }))
}

/// Look up scripture references for a topic
pub async fn get_scripture_references(Query(params): Query<ScriptureParams>) -> Json<Value> {
    let topic_lower = params.topic.to_lowercase();
    let tradition_lower = params.tradition.to_lowercase();

    let mut relevant: Vec<Value> = Vec::new();
    for (tradition, verses) in content::scriptures() {
        if tradition_lower != "all" && !tradition.contains(&tradition_lower) {
            continue;
        }
        for mut verse in verses {
            let matches_topic = verse
                .get("topic")
                .and_then(Value::as_array)
                .map(|topics| {
                    topics.iter().filter_map(Value::as_str).any(|t| {
                        topic_lower.contains(t) || t.contains(&topic_lower)
                    })
                })
                .unwrap_or(false);

            if matches_topic {
                if let Some(obj) = verse.as_object_mut() {
                    obj.insert("tradition".to_string(), json!(tradition));
                }
                relevant.push(verse);
            }
        }
    }
    relevant.truncate(5);

    Json(json!({
        "topic": params.topic,
        "tradition": params.tradition,
        "scriptures": relevant,
    }))
}

/// Get spiritual practices for a goal
pub async fn get_spiritual_practices(Query(params): Query<PracticeParams>) -> Json<Value> {
    let practices = content::practices_for_goal(&params.goal.to_lowercase());

    Json(json!({
        "goal": params.goal,
        "practices": practices,
        "tip": "Start with shorter durations and gradually increase as you build your practice.",
    }))
}

/// Get daily positive affirmations
pub async fn get_daily_affirmations(Query(params): Query<AffirmationParams>) -> Json<Value> {
    let pool = content::affirmations_for_focus(&params.focus.to_lowercase());
    let count = params.count.min(10).min(pool.len());

    let mut rng = rand::thread_rng();
    let selected: Vec<&str> = pool.choose_multiple(&mut rng, count).copied().collect();

    Json(json!({
        "focus": params.focus,
        "affirmations": selected,
        "suggestion": "Repeat these affirmations in the morning or whenever you need encouragement.",
    }))
}

/// List curated spiritual videos
pub async fn get_spiritual_videos() -> Json<Value> {
    Json(json!({
        "videos": content::videos(),
        "message": "AI-generated spiritual content coming soon",
    }))
}

/// Split generated wisdom into quote, source, and reflection lines
///
/// The model output has no fixed shape; the first line is taken as the
/// quote, the first dashed line as the source, and the first remaining
/// line as the reflection.
fn parse_wisdom(wisdom: &str) -> (String, Option<String>, Option<String>) {
    let lines: Vec<&str> = wisdom.lines().collect();
    let quote = lines
        .first()
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Peace begins with a smile.".to_string());

    let mut source = None;
    let mut reflection = None;

    for line in &lines {
        if line.contains('-') && source.is_none() {
            source = Some(line.trim_matches(|c| c == '-' || c == ' ').to_string());
        } else if !line.is_empty() && !quote.starts_with(*line) && reflection.is_none() {
            reflection = Some(line.to_string());
        }
    }

    (quote, source, reflection)
}
