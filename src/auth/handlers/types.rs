/**
 * Authentication Handler Types
 *
 * Request and response types shared by the signup, login, and profile
 * handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::UserRecord;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's email address
    pub email: String,
    /// User's password (hashed before storage)
    pub password: String,
    /// Optional display name shown in community features
    #[serde(default)]
    pub display_name: Option<String>,
    /// Preferred response language (ISO 639-1), defaults to English
    #[serde(default)]
    pub preferred_language: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request; absent fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
}

/// Token response
///
/// Returned by signup and login. Carries the bearer token and the user
/// profile for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// User profile response (never includes the credential hash)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub preferred_language: String,
}

impl From<&UserRecord> for UserResponse {
    fn from(record: &UserRecord) -> Self {
        Self {
            uid: record.uid.clone(),
            email: record.email.clone(),
            display_name: record.display_name.clone(),
            preferred_language: record.preferred_language.clone(),
        }
    }
}

/// Simple acknowledgement message
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
