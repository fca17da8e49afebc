/**
 * Profile Handlers
 *
 * The authenticated /api/auth/me surface: read and update the current
 * profile, logout, and account deletion. Sessions are stateless JWTs,
 * so logout performs no server-side work beyond the acknowledgement.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{MessageResponse, UserResponse, UserUpdateRequest};
use crate::auth::users::{get_by_id, USERS_COLLECTION};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Get the current user's profile
///
/// Falls back to the token claims when the profile document is absent,
/// matching the claims snapshot taken at login.
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let response = match get_by_id(state.store.as_ref(), &claims.sub).await? {
        Some(record) => UserResponse::from(&record),
        None => UserResponse {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.display_name,
            preferred_language: claims.preferred_language,
        },
    };

    Ok(Json(response))
}

/// Update the current user's profile
///
/// Only `display_name` and `preferred_language` are mutable. Save is a
/// full overwrite, so the stored document is read first and merged.
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<UserUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    tracing::info!("Profile update for user {}", claims.sub);

    let mut record = get_by_id(state.store.as_ref(), &claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(display_name) = request.display_name {
        record.display_name = Some(display_name);
    }
    if let Some(language) = request.preferred_language {
        record.preferred_language = language;
    }

    state
        .store
        .save(USERS_COLLECTION, &record.uid, record.to_fields())
        .await?;

    Ok(Json(UserResponse::from(&record)))
}

/// Logout acknowledgement; clients discard the token
pub async fn logout(AuthUser(claims): AuthUser) -> Json<MessageResponse> {
    tracing::info!("Logout for user {}", claims.sub);
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// Delete the current user's account document
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Account deletion for user {}", claims.sub);

    state.store.delete(USERS_COLLECTION, &claims.sub).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}
