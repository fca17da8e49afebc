/**
 * Server Configuration
 *
 * Environment-driven settings with development defaults. Missing
 * external credentials are logged and disable the corresponding
 * adapter; they never prevent server startup.
 */

use std::sync::Arc;

use crate::store::{DocumentStore, FirestoreStore, MemoryStore};

/// Fixed crisis keyword list; a substring match on any entry is an
/// immediate high-confidence crisis verdict
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "hurt myself",
    "no reason to live",
    "better off dead",
    "can't go on",
    "worthless",
];

/// Languages accepted for detection and translation targets
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "hi", "bn", "te", "mr", "ta", "ur", "gu", "kn", "ml",
];

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub port: u16,
    /// HS256 signing key for session tokens
    pub secret_key: String,
    pub token_expiry_hours: i64,
    /// Firestore project; `None` selects the in-memory store
    pub firestore_project_id: Option<String>,
    pub firestore_access_token: Option<String>,
    /// API key for the translation and sentiment REST APIs
    pub google_api_key: Option<String>,
    pub chat_model: String,
    pub crisis_model: String,
    pub translate_endpoint: String,
    pub language_endpoint: String,
    pub supported_languages: Vec<String>,
    pub crisis_keywords: Vec<String>,
}

impl Settings {
    /// Load settings from the environment
    pub fn from_env() -> Self {
        let secret_key = std::env::var("APP_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("APP_SECRET_KEY not set; using development default");
            "default-secret-key-change-in-production".to_string()
        });

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        // A fine-tuned model id can replace the base chat model
        let chat_model = std::env::var("CHAT_MODEL_ID")
            .unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        Self {
            app_name: "Zenith Mental Wellness Platform".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            port,
            secret_key,
            token_expiry_hours: 24,
            firestore_project_id: std::env::var("FIRESTORE_PROJECT_ID").ok(),
            firestore_access_token: std::env::var("FIRESTORE_ACCESS_TOKEN").ok(),
            google_api_key: std::env::var("GOOGLE_API_KEY").ok(),
            chat_model,
            crisis_model: "gemini-1.5-flash".to_string(),
            translate_endpoint: "https://translation.googleapis.com/language/translate/v2"
                .to_string(),
            language_endpoint:
                "https://language.googleapis.com/v1/documents:analyzeSentiment".to_string(),
            supported_languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            crisis_keywords: CRISIS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Settings with no external services configured; used by unit and
    /// integration tests so every adapter takes its degraded path
    pub fn for_tests() -> Self {
        Self {
            app_name: "Zenith Mental Wellness Platform".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            port: 0,
            secret_key: "test-secret-key".to_string(),
            token_expiry_hours: 24,
            firestore_project_id: None,
            firestore_access_token: None,
            google_api_key: None,
            chat_model: "gemini-1.5-flash".to_string(),
            crisis_model: "gemini-1.5-flash".to_string(),
            translate_endpoint: "https://translation.googleapis.com/language/translate/v2"
                .to_string(),
            language_endpoint:
                "https://language.googleapis.com/v1/documents:analyzeSentiment".to_string(),
            supported_languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            crisis_keywords: CRISIS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Select and initialize the document store
///
/// Firestore requires both a project id and an access token; anything
/// less falls back to the in-memory store with a warning, so the server
/// always starts.
pub fn load_store(settings: &Settings) -> Arc<dyn DocumentStore> {
    match (
        settings.firestore_project_id.as_deref(),
        settings.firestore_access_token.clone(),
    ) {
        (Some(project_id), Some(token)) => {
            match FirestoreStore::new(project_id, token, None) {
                Ok(store) => {
                    tracing::info!("Firestore store initialized for project {project_id}");
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Firestore: {e}");
                    tracing::warn!("Falling back to in-memory store");
                    Arc::new(MemoryStore::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Firestore not configured (FIRESTORE_PROJECT_ID / FIRESTORE_ACCESS_TOKEN); \
                 using in-memory store"
            );
            Arc::new(MemoryStore::new())
        }
    }
}
