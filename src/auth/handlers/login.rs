/**
 * Login Handler
 *
 * Implements email/password authentication for POST /api/auth/login.
 * The stored bcrypt hash is verified against the supplied password; an
 * unknown email and a wrong password produce the same 401 response so
 * the endpoint does not leak which accounts exist.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::auth::handlers::types::{LoginRequest, TokenResponse, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::find_by_email;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticate with email and password
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store or token failures
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Login request for email: {}", request.email);

    let record = find_by_email(state.store.as_ref(), &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, unknown email: {}", request.email);
            ApiError::unauthorized("Invalid email or password")
        })?;

    let valid = verify(&request.password, &record.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {e:?}");
        ApiError::internal("An error occurred during login")
    })?;

    if !valid {
        tracing::warn!("Login failed, wrong password for: {}", request.email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let access_token = create_token(
        &state.settings,
        &record.uid,
        &record.email,
        record.display_name.clone(),
        &record.preferred_language,
    )
    .map_err(|e| {
        tracing::error!("Failed to create token: {e:?}");
        ApiError::internal("An error occurred during login")
    })?;

    tracing::info!("Login successful for user {}", record.uid);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(&record),
    }))
}
