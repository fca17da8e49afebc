/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user
 * sessions. Tokens are signed with the configured secret and carry the
 * user's profile snapshot so handlers can personalize responses without
 * a store lookup.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::config::Settings;

fn default_language() -> String {
    "en".to_string()
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name shown in community and chat
    #[serde(default)]
    pub display_name: Option<String>,
    /// Preferred response language (ISO 639-1)
    #[serde(default = "default_language")]
    pub preferred_language: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `settings` - Application settings holding the signing secret
/// * `user_id` - User document id
/// * `email` - User email
/// * `display_name` - Optional display name
/// * `preferred_language` - Preferred response language
///
/// # Returns
/// JWT token string, valid for `settings.token_expiry_hours`
pub fn create_token(
    settings: &Settings,
    user_id: &str,
    email: &str,
    display_name: Option<String>,
    preferred_language: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let exp = now + chrono::Duration::hours(settings.token_expiry_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        display_name,
        preferred_language: preferred_language.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    let key = EncodingKey::from_secret(settings.secret_key.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `settings` - Application settings holding the signing secret
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims, or an error for expired or tampered tokens
pub fn verify_token(
    settings: &Settings,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(settings.secret_key.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
