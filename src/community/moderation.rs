/**
 * Content Moderation
 *
 * Two-signal gate for community content: a fixed keyword list plus a
 * sentiment reading. Content is rejected only when a flagged keyword
 * appears AND the sentiment adapter reports strongly negative text.
 * Either signal alone is not enough.
 */

use crate::ai::AiService;

const FLAGGED_KEYWORDS: &[&str] = &["hate", "violence", "abuse", "harassment"];

/// Magnitude the negative reading must exceed before rejection
const NEGATIVE_MAGNITUDE_THRESHOLD: f64 = 0.8;

/// Check whether content should be rejected
///
/// The sentiment call only happens after a keyword hit, so clean
/// content never costs an adapter round trip.
pub async fn is_content_inappropriate(ai: &AiService, content: &str) -> bool {
    let content_lower = content.to_lowercase();

    if !FLAGGED_KEYWORDS.iter().any(|kw| content_lower.contains(kw)) {
        return false;
    }

    let sentiment = ai.analyze_sentiment(content).await;
    sentiment.is_negative() && sentiment.magnitude > NEGATIVE_MAGNITUDE_THRESHOLD
}
