/**
 * AI Orchestration Adapter
 *
 * This module wraps every external AI capability behind one service:
 *
 * - Generative text (chat replies, meditation scripts, spiritual wisdom)
 *   through the `genai` client
 * - Language detection and translation through the Google Translate
 *   REST API
 * - Sentiment analysis through the Natural Language REST API
 * - Crisis detection: a fixed keyword scan backed by an optional
 *   generative-model check
 *
 * # Graceful Degradation
 *
 * No operation on this service returns a `Result`. Missing configuration
 * and downstream failures degrade to fixed defaults at this boundary:
 * detection falls back to English, translation returns its input,
 * sentiment reads neutral, crisis detection reports a low-confidence
 * non-crisis, and generation returns a fixed apology. Callers never see
 * an adapter failure.
 */

pub mod crisis;
pub mod language;

pub use crisis::CrisisVerdict;
pub use language::Sentiment;

use genai::chat::{ChatMessage, ChatRequest};
use thiserror::Error;

use crate::server::config::Settings;

/// A model call that was attempted but failed
///
/// Distinct from the model being unconfigured or returning empty
/// output; crisis detection maps this to its error verdict while the
/// other paths degrade the same way as a missing model.
#[derive(Debug, Error)]
#[error("model call failed: {0}")]
pub struct ModelCallError(String);

impl ModelCallError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Reply returned when the generative model is not configured or fails
pub const UNAVAILABLE_REPLY: &str =
    "I apologize, but the AI service is currently unavailable. Please try again later.";

/// Reply returned when the model produces empty output
pub const EMPTY_REPLY: &str = "I'm here to help. Could you please rephrase your question?";

/// One prior exchange used as conversation context
#[derive(Debug, Clone)]
pub struct ContextTurn {
    pub user: String,
    pub assistant: String,
}

/// Singleton adapter over the generative, translation, and sentiment
/// services; holds no per-request state
pub struct AiService {
    /// Generative client; `None` when no model API key is configured
    generative: Option<genai::Client>,
    chat_model: String,
    crisis_model: String,
    /// Client for the translation and sentiment REST calls
    pub(crate) http: reqwest::Client,
    /// API key for the REST calls; `None` disables them
    pub(crate) google_api_key: Option<String>,
    pub(crate) translate_endpoint: String,
    pub(crate) language_endpoint: String,
    pub(crate) supported_languages: Vec<String>,
    pub(crate) crisis_keywords: Vec<String>,
}

impl AiService {
    /// Build the adapter from settings
    ///
    /// The generative client is only constructed when `GEMINI_API_KEY`
    /// is present in the environment; the `genai` client resolves the
    /// key itself. Missing configuration logs a warning and leaves the
    /// corresponding capability disabled.
    pub fn new(settings: &Settings) -> Self {
        let generative = if std::env::var("GEMINI_API_KEY").is_ok() {
            tracing::info!("Generative model client initialized ({})", settings.chat_model);
            Some(genai::Client::default())
        } else {
            tracing::warn!("GEMINI_API_KEY not set; generative features disabled");
            None
        };

        if settings.google_api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY not set; translation and sentiment disabled");
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            generative,
            chat_model: settings.chat_model.clone(),
            crisis_model: settings.crisis_model.clone(),
            http,
            google_api_key: settings.google_api_key.clone(),
            translate_endpoint: settings.translate_endpoint.clone(),
            language_endpoint: settings.language_endpoint.clone(),
            supported_languages: settings.supported_languages.clone(),
            crisis_keywords: settings.crisis_keywords.clone(),
        }
    }

    /// Run a single prompt against a generative model
    ///
    /// `Ok(None)` means the client is disabled or the model returned no
    /// text; `Err` means the call itself failed.
    pub(crate) async fn prompt_model(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Option<String>, ModelCallError> {
        let Some(client) = self.generative.as_ref() else {
            return Ok(None);
        };
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        match client.exec_chat(model, request, None).await {
            Ok(response) => {
                let text = response.content_text_as_str().unwrap_or_default().trim().to_string();
                Ok(if text.is_empty() { None } else { Some(text) })
            }
            Err(e) => {
                tracing::error!("Generative model call failed: {e}");
                Err(ModelCallError::new(e.to_string()))
            }
        }
    }

    /// Generate a chat reply, folding prior turns into the prompt
    ///
    /// Only the five most recent context turns are used.
    pub async fn generate_reply(&self, message: &str, context: &[ContextTurn]) -> String {
        if self.generative.is_none() {
            return UNAVAILABLE_REPLY.to_string();
        }

        let prompt = if context.is_empty() {
            message.to_string()
        } else {
            let recent = &context[context.len().saturating_sub(5)..];
            let conversation = recent
                .iter()
                .map(|turn| format!("User: {}\nAssistant: {}", turn.user, turn.assistant))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Previous conversation:\n{conversation}\n\nUser: {message}\nAssistant:")
        };

        match self.prompt_model(&self.chat_model, &prompt).await.ok().flatten() {
            Some(text) => text,
            None => EMPTY_REPLY.to_string(),
        }
    }

    /// Generate a guided meditation script, falling back to a built-in
    /// script when the model is unavailable
    pub async fn generate_meditation_script(&self, duration_minutes: u32, focus: &str) -> String {
        let prompt = format!(
            "Create a {duration_minutes}-minute guided meditation script focused on {focus}.\n\
             Include:\n\
             - Opening breathing exercise\n\
             - Body relaxation\n\
             - Visualization or mindfulness practice\n\
             - Closing affirmations\n\n\
             Make it suitable for young adults dealing with stress and anxiety.\n\
             Format it as a script that can be read aloud."
        );

        match self.prompt_model(&self.chat_model, &prompt).await.ok().flatten() {
            Some(text) => text,
            None => default_meditation_script(duration_minutes),
        }
    }

    /// Generate spiritual wisdom for a tradition, falling back to a
    /// built-in quote when the model is unavailable
    pub async fn generate_spiritual_wisdom(&self, tradition: &str) -> String {
        let prompt = format!(
            "Provide an inspiring spiritual quote or wisdom from {tradition} tradition \
             that would help a young person dealing with life challenges. \
             Include the source if applicable and a brief reflection on how to apply this wisdom."
        );

        match self.prompt_model(&self.chat_model, &prompt).await.ok().flatten() {
            Some(text) => text,
            None => default_spiritual_quote(),
        }
    }

    /// Generate personalized spiritual guidance for a concern
    pub async fn generate_spiritual_guidance(&self, concern: &str, tradition: &str) -> String {
        let prompt = format!(
            "Provide spiritual guidance for someone dealing with: {concern}\n\
             From the {tradition} tradition perspective.\n\
             Include practical spiritual practices they can follow."
        );

        match self.prompt_model(&self.chat_model, &prompt).await.ok().flatten() {
            Some(text) => text,
            None => "Take time for quiet reflection and meditation on your concern.".to_string(),
        }
    }

    pub(crate) fn crisis_model(&self) -> &str {
        &self.crisis_model
    }
}

/// Built-in meditation script used when generation is unavailable
pub fn default_meditation_script(duration_minutes: u32) -> String {
    format!(
        "Welcome to this {duration_minutes}-minute meditation session.\n\n\
         Find a comfortable position and gently close your eyes.\n\n\
         Begin by taking three deep breaths:\n\
         - Breathe in slowly through your nose... hold... and exhale through your mouth.\n\
         - Again, breathe in... hold... and release.\n\
         - One more time, deep breath in... and let it all go.\n\n\
         Now, let your breathing return to its natural rhythm.\n\n\
         Notice how your body feels right now. Starting from the top of your head,\n\
         slowly scan down through your body, releasing any tension you find.\n\n\
         Your forehead... your jaw... your shoulders... let them all soften.\n\n\
         Continue breathing naturally, knowing that in this moment, you are safe and at peace.\n\n\
         When you're ready, slowly bring your awareness back to the room.\n\
         Wiggle your fingers and toes.\n\
         Take a deep breath and open your eyes.\n\n\
         Thank you for taking this time for yourself."
    )
}

/// Built-in quote used when generation is unavailable
pub fn default_spiritual_quote() -> String {
    "\"The best way to find yourself is to lose yourself in the service of others.\"\n\
     - Mahatma Gandhi\n\n\
     This timeless wisdom reminds us that when we focus on helping others,\n\
     we often discover our own strength and purpose. In moments of difficulty,\n\
     reaching out to support someone else can bring unexpected healing to our own hearts."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::Settings;

    fn unconfigured_service() -> AiService {
        AiService::new(&Settings::for_tests())
    }

    #[tokio::test]
    async fn test_generate_reply_unavailable() {
        let ai = unconfigured_service();
        let reply = ai.generate_reply("hello", &[]).await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn test_meditation_script_falls_back() {
        let ai = unconfigured_service();
        let script = ai.generate_meditation_script(5, "general").await;
        assert!(script.contains("5-minute meditation session"));
    }

    #[tokio::test]
    async fn test_spiritual_wisdom_falls_back() {
        let ai = unconfigured_service();
        let wisdom = ai.generate_spiritual_wisdom("universal").await;
        assert!(wisdom.contains("Mahatma Gandhi"));
    }
}
