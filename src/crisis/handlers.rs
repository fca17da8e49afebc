/**
 * Crisis Endpoints
 *
 * Crisis checking, static resource listings, and self-reporting.
 * The check endpoint never returns an error to the caller; any
 * failure downgrades to a safe non-crisis response with default
 * resources so the client always has something to show.
 */

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::crisis::resources;
use crate::error::ApiError;
use crate::middleware::auth::OptionalAuthUser;
use crate::server::state::AppState;
use crate::store::fields;

pub const CRISIS_ALERTS_COLLECTION: &str = "crisis_alerts";
pub const CRISIS_REPORTS_COLLECTION: &str = "crisis_reports";

/// Alerts are only persisted above this confidence
const ALERT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Stored alert messages are truncated for privacy
const ALERT_MESSAGE_MAX_CHARS: usize = 500;

#[derive(Deserialize, Debug)]
pub struct CrisisCheckRequest {
    pub message: String,
    #[serde(default)]
    pub user_context: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CrisisCheckResponse {
    pub is_crisis: bool,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub recommended_action: String,
    pub support_resources: Vec<Value>,
    pub emergency_contacts: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct CrisisReportRequest {
    pub message: String,
}

/// Check a message for crisis indicators
///
/// High-confidence detections are logged to the alerts collection with
/// the message truncated. Store failures downgrade the whole response
/// to the non-crisis default instead of erroring.
pub async fn check_for_crisis(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(request): Json<CrisisCheckRequest>,
) -> Json<CrisisCheckResponse> {
    let verdict = state.ai.detect_crisis(&request.message).await;

    if verdict.is_crisis && verdict.confidence > ALERT_CONFIDENCE_THRESHOLD {
        let now = chrono::Utc::now().to_rfc3339();
        let alert_id = format!("alert_{now}");
        let truncated: String = request.message.chars().take(ALERT_MESSAGE_MAX_CHARS).collect();

        let doc = fields([
            (
                "user_id",
                claims.as_ref().map(|c| json!(c.sub)).unwrap_or(Value::Null),
            ),
            ("message", json!(truncated)),
            ("detection_result", json!(verdict)),
            ("timestamp", json!(now)),
            ("handled", json!(false)),
        ]);

        if let Err(e) = state.store.save(CRISIS_ALERTS_COLLECTION, &alert_id, doc).await {
            tracing::error!("Failed to log crisis alert: {e}");
            return Json(CrisisCheckResponse {
                is_crisis: false,
                confidence: 0.0,
                kind: "error".to_string(),
                recommended_action: "seek_support".to_string(),
                support_resources: resources::default_resources(),
                emergency_contacts: resources::default_emergency_contacts(),
            });
        }

        tracing::warn!("Crisis alert logged: {alert_id}");
    }

    Json(CrisisCheckResponse {
        is_crisis: verdict.is_crisis,
        confidence: verdict.confidence,
        kind: verdict.kind,
        recommended_action: verdict.recommended_action,
        support_resources: resources::support_resources(verdict.is_crisis),
        emergency_contacts: resources::emergency_contacts(),
    })
}

/// List crisis support resources
pub async fn get_crisis_resources(OptionalAuthUser(_claims): OptionalAuthUser) -> Json<Value> {
    Json(json!({
        "helplines": resources::helplines(),
        "support_groups": resources::support_groups(),
        "self_help": resources::self_help_resources(),
        "professional_help": resources::professional_resources(),
    }))
}

/// Self-report a crisis situation
pub async fn report_crisis(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    Json(request): Json<CrisisReportRequest>,
) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now().to_rfc3339();
    let report_id = format!("report_{now}");

    let doc = fields([
        (
            "user_id",
            claims.as_ref().map(|c| json!(c.sub)).unwrap_or(Value::Null),
        ),
        ("message", json!(request.message)),
        ("timestamp", json!(now)),
        ("status", json!("pending")),
        ("self_reported", json!(true)),
    ]);

    state
        .store
        .save(CRISIS_REPORTS_COLLECTION, &report_id, doc)
        .await?;

    tracing::info!("Crisis self-report stored: {report_id}");

    Ok(Json(json!({
        "message": "Your report has been received. Help is available.",
        "report_id": report_id,
        "immediate_support": resources::immediate_support(),
    })))
}
