/**
 * Language Detection, Translation, and Sentiment
 *
 * REST calls against the Google Translate and Natural Language APIs,
 * authenticated with an API key. Every operation degrades to a safe
 * default: English for detection, the untouched input for translation,
 * and a neutral zero reading for sentiment.
 */

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AiService;

/// Pivot language used for generation before translating back
pub const PIVOT_LANGUAGE: &str = "en";

/// Sentiment snapshot for a piece of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    /// Category: "negative" below -0.25, "positive" above 0.25,
    /// otherwise "neutral"
    pub sentiment: String,
    pub score: f64,
    pub magnitude: f64,
}

impl Sentiment {
    /// Neutral zero reading, used whenever analysis is unavailable
    pub fn neutral() -> Self {
        Self {
            sentiment: "neutral".to_string(),
            score: 0.0,
            magnitude: 0.0,
        }
    }

    pub fn from_scores(score: f64, magnitude: f64) -> Self {
        let category = if score < -0.25 {
            "negative"
        } else if score > 0.25 {
            "positive"
        } else {
            "neutral"
        };
        Self {
            sentiment: category.to_string(),
            score,
            magnitude,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment == "negative"
    }
}

impl AiService {
    /// Detect the language of a text, defaulting to English
    ///
    /// Codes outside the supported-language list also fall back to
    /// English rather than surfacing an unusable code.
    pub async fn detect_language(&self, text: &str) -> String {
        let Some(key) = self.google_api_key.as_deref() else {
            return PIVOT_LANGUAGE.to_string();
        };

        let url = format!("{}/detect", self.translate_endpoint);
        let result = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&json!({ "q": text }))
            .send()
            .await;

        let detected = match result {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.pointer("/data/detections/0/0/language")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                }),
            Ok(response) => {
                tracing::error!("Language detection returned {}", response.status());
                None
            }
            Err(e) => {
                tracing::error!("Language detection failed: {e}");
                None
            }
        };

        match detected {
            Some(code) if self.supported_languages.iter().any(|l| l == &code) => code,
            _ => PIVOT_LANGUAGE.to_string(),
        }
    }

    /// Translate text to a target language
    ///
    /// Returns the input unchanged when the target equals the source,
    /// the target is unsupported, or the service is unavailable/fails.
    pub async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> String {
        if source == Some(target) {
            return text.to_string();
        }
        if !self.supported_languages.iter().any(|l| l == target) {
            tracing::warn!("Unsupported target language: {target}");
            return text.to_string();
        }
        let Some(key) = self.google_api_key.as_deref() else {
            tracing::warn!("Translation service not available");
            return text.to_string();
        };

        let mut body = json!({ "q": text, "target": target, "format": "text" });
        if let Some(source) = source {
            body["source"] = json!(source);
        }

        let result = self
            .http
            .post(&self.translate_endpoint)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await;

        let translated = match result {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.pointer("/data/translations/0/translatedText")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                }),
            Ok(response) => {
                tracing::error!("Translation returned {}", response.status());
                None
            }
            Err(e) => {
                tracing::error!("Translation failed: {e}");
                None
            }
        };

        translated.unwrap_or_else(|| text.to_string())
    }

    /// Analyze the sentiment of a text, defaulting to a neutral reading
    pub async fn analyze_sentiment(&self, text: &str) -> Sentiment {
        let Some(key) = self.google_api_key.as_deref() else {
            return Sentiment::neutral();
        };

        let body = json!({
            "document": { "type": "PLAIN_TEXT", "content": text },
            "encodingType": "UTF8",
        });

        let result = self
            .http
            .post(&self.language_endpoint)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => {
                        let score = body
                            .pointer("/documentSentiment/score")
                            .and_then(Value::as_f64)
                            .unwrap_or(0.0);
                        let magnitude = body
                            .pointer("/documentSentiment/magnitude")
                            .and_then(Value::as_f64)
                            .unwrap_or(0.0);
                        Sentiment::from_scores(score, magnitude)
                    }
                    Err(e) => {
                        tracing::error!("Sentiment body parse failed: {e}");
                        Sentiment::neutral()
                    }
                }
            }
            Ok(response) => {
                tracing::error!("Sentiment analysis returned {}", response.status());
                Sentiment::neutral()
            }
            Err(e) => {
                tracing::error!("Sentiment analysis failed: {e}");
                Sentiment::neutral()
            }
        }
    }
}
