/**
 * Signup Handler
 *
 * Implements user registration for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email format and password length
 * 2. Check that no user with this email exists
 * 3. Hash the password with bcrypt
 * 4. Save the user document
 * 5. Issue a session token
 *
 * # Security
 *
 * Passwords are hashed with bcrypt at DEFAULT_COST and never returned
 * in responses.
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{SignupRequest, TokenResponse, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::{find_by_email, UserRecord, USERS_COLLECTION};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Register a new user account
///
/// # Errors
///
/// * `400 Bad Request` - invalid email, short password, or duplicate email
/// * `500 Internal Server Error` - store or token failures
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Signup request for email: {}", request.email);

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::bad_request("Invalid email format"));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short for signup");
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    if find_by_email(state.store.as_ref(), &request.email)
        .await?
        .is_some()
    {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(ApiError::bad_request("User with this email already exists"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {e:?}");
        ApiError::internal("An error occurred during signup")
    })?;

    let record = UserRecord {
        uid: uuid::Uuid::new_v4().to_string(),
        email: request.email.clone(),
        display_name: request.display_name.clone(),
        preferred_language: request.preferred_language.unwrap_or_else(|| "en".to_string()),
        password_hash,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state
        .store
        .save(USERS_COLLECTION, &record.uid, record.to_fields())
        .await?;

    let access_token = create_token(
        &state.settings,
        &record.uid,
        &record.email,
        record.display_name.clone(),
        &record.preferred_language,
    )
    .map_err(|e| {
        tracing::error!("Failed to create token: {e:?}");
        ApiError::internal("An error occurred during signup")
    })?;

    tracing::info!("User created: {} ({})", record.uid, record.email);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(&record),
    }))
}
