/**
 * Crisis Detection
 *
 * Two-stage check for messages indicating a mental health crisis:
 *
 * 1. A fixed keyword list, scanned as lowercase substrings. A match is
 *    a high-confidence verdict and short-circuits the model call.
 * 2. A generative-model call prompted to emit a structured verdict,
 *    parsed permissively.
 *
 * A failed model call yields the zero-confidence error verdict; a
 * disabled model or unusable output yields the no-indicators default.
 * The adapter never raises toward the caller.
 */

use serde::{Deserialize, Serialize};

use super::{AiService, ModelCallError};

/// Outcome of a crisis check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisisVerdict {
    pub is_crisis: bool,
    pub confidence: f64,
    /// How the verdict was reached: "explicit_keyword", "ai_detection",
    /// "no_indicators", or "error"
    #[serde(rename = "type")]
    pub kind: String,
    pub recommended_action: String,
}

impl CrisisVerdict {
    fn keyword_match() -> Self {
        Self {
            is_crisis: true,
            confidence: 0.95,
            kind: "explicit_keyword".to_string(),
            recommended_action: "immediate_support".to_string(),
        }
    }

    fn model(is_crisis: bool) -> Self {
        Self {
            is_crisis,
            confidence: if is_crisis { 0.8 } else { 0.2 },
            kind: "ai_detection".to_string(),
            recommended_action: if is_crisis {
                "immediate_support".to_string()
            } else {
                "monitor".to_string()
            },
        }
    }

    fn no_indicators() -> Self {
        Self {
            is_crisis: false,
            confidence: 0.1,
            kind: "no_indicators".to_string(),
            recommended_action: "continue_conversation".to_string(),
        }
    }

    pub fn error() -> Self {
        Self {
            is_crisis: false,
            confidence: 0.0,
            kind: "error".to_string(),
            recommended_action: "monitor".to_string(),
        }
    }
}

/// Minimal shape of the model's structured verdict
#[derive(Deserialize)]
struct ModelVerdict {
    is_crisis: bool,
}

/// Parse the model output into a crisis flag
///
/// Tries strict JSON first, stripping markdown code fences if present.
/// Falls back to a lowercase substring scan for `"is_crisis": true`.
/// TODO: replace the fallback once the model is pinned to a structured
/// output mode; the substring scan misreads nested or re-cased JSON.
fn parse_model_verdict(raw: &str) -> Option<bool> {
    let trimmed = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if let Ok(verdict) = serde_json::from_str::<ModelVerdict>(trimmed) {
        return Some(verdict.is_crisis);
    }

    if trimmed.to_lowercase().contains("\"is_crisis\": true") {
        return Some(true);
    }
    if trimmed.to_lowercase().contains("\"is_crisis\": false") {
        return Some(false);
    }
    None
}

impl AiService {
    /// Check whether a message indicates a crisis situation
    pub async fn detect_crisis(&self, message: &str) -> CrisisVerdict {
        let message_lower = message.to_lowercase();
        for keyword in &self.crisis_keywords {
            if message_lower.contains(keyword) {
                tracing::warn!("Crisis keyword matched in message");
                return CrisisVerdict::keyword_match();
            }
        }

        let prompt = format!(
            "Analyze the following message for signs of mental health crisis or suicidal ideation.\n\
             Respond with JSON format: {{\"is_crisis\": boolean, \"confidence\": float (0-1), \"indicators\": list}}\n\n\
             Message: {message}"
        );

        verdict_from_model(self.prompt_model(self.crisis_model(), &prompt).await)
    }
}

/// Map the model stage's outcome to a verdict
///
/// A failed call is distinct from a disabled model or empty output: the
/// former yields the zero-confidence error verdict, the latter the
/// no-indicators default.
fn verdict_from_model(outcome: Result<Option<String>, ModelCallError>) -> CrisisVerdict {
    match outcome {
        Err(e) => {
            tracing::error!("Crisis model stage failed: {e}");
            CrisisVerdict::error()
        }
        Ok(Some(raw)) => match parse_model_verdict(&raw) {
            Some(is_crisis) => CrisisVerdict::model(is_crisis),
            None => {
                tracing::warn!("Unparseable crisis verdict from model");
                CrisisVerdict::no_indicators()
            }
        },
        Ok(None) => CrisisVerdict::no_indicators(),
    }
}
