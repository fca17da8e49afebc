/**
 * Router Configuration
 *
 * Combines every feature area's routes under the /api prefix, adds
 * the health endpoint and CORS, and attaches the shared state.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/me` - Current profile
 * - `PUT /api/auth/me` - Update profile
 * - `DELETE /api/auth/me` - Delete account
 * - `POST /api/auth/logout` - Logout acknowledgement
 *
 * ## Chat
 * - `POST /api/chat/message` - Send a message (optional auth)
 * - `GET /api/chat/history` - Chat history
 * - `DELETE /api/chat/history/{session_id}` - Delete one turn
 * - `DELETE /api/chat/history` - Clear history
 *
 * ## Crisis
 * - `POST /api/crisis/check` - Crisis check (optional auth)
 * - `GET /api/crisis/resources` - Support resources
 * - `POST /api/crisis/report` - Self-report
 *
 * ## Community
 * - `POST /api/community/posts` - Create post
 * - `GET /api/community/posts` - List posts
 * - `GET /api/community/posts/{post_id}` - Get post
 * - `DELETE /api/community/posts/{post_id}` - Soft-delete post
 * - `POST /api/community/posts/{post_id}/comments` - Add comment
 * - `GET /api/community/posts/{post_id}/comments` - List comments
 * - `POST /api/community/posts/{post_id}/like` - Like
 * - `DELETE /api/community/posts/{post_id}/like` - Unlike
 *
 * ## Meditation
 * - `POST /api/meditation/script` - Generate script (optional auth)
 * - `GET /api/meditation/breathing` - Breathing exercise
 * - `GET /api/meditation/guided` - Guided meditations
 * - `GET /api/meditation/music` - Music tracks
 * - `POST /api/meditation/log` - Log a session
 * - `GET /api/meditation/stats` - User statistics
 * - `GET /api/meditation/reminders` - Reminder preferences
 *
 * ## Spiritual
 * - `GET /api/spiritual/quote` - Daily quote (optional auth)
 * - `POST /api/spiritual/guidance` - Personalized guidance
 * - `GET /api/spiritual/scriptures` - Scripture lookup
 * - `GET /api/spiritual/practices` - Practices for a goal
 * - `GET /api/spiritual/affirmations` - Daily affirmations
 * - `GET /api/spiritual/videos` - Curated videos
 *
 * ## Meta
 * - `GET /health` - Liveness and version
 */

use axum::{
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::auth::handlers as auth;
use crate::chat::handlers as chat;
use crate::community::handlers as community;
use crate::crisis::handlers as crisis;
use crate::meditation::handlers as meditation;
use crate::server::state::AppState;
use crate::spiritual::handlers as spiritual;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Authentication
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/me",
            get(auth::get_me)
                .put(auth::update_me)
                .delete(auth::delete_account),
        )
        .route("/api/auth/logout", post(auth::logout))
        // Chat
        .route("/api/chat/message", post(chat::send_message))
        .route(
            "/api/chat/history",
            get(chat::get_chat_history).delete(chat::clear_chat_history),
        )
        .route(
            "/api/chat/history/{session_id}",
            delete(chat::delete_chat_message),
        )
        // Crisis
        .route("/api/crisis/check", post(crisis::check_for_crisis))
        .route("/api/crisis/resources", get(crisis::get_crisis_resources))
        .route("/api/crisis/report", post(crisis::report_crisis))
        // Community
        .route(
            "/api/community/posts",
            post(community::create_post).get(community::get_posts),
        )
        .route(
            "/api/community/posts/{post_id}",
            get(community::get_post).delete(community::delete_post),
        )
        .route(
            "/api/community/posts/{post_id}/comments",
            post(community::add_comment).get(community::get_comments),
        )
        .route(
            "/api/community/posts/{post_id}/like",
            post(community::like_post).delete(community::unlike_post),
        )
        // Meditation
        .route("/api/meditation/script", post(meditation::generate_script))
        .route(
            "/api/meditation/breathing",
            get(meditation::get_breathing_exercise),
        )
        .route(
            "/api/meditation/guided",
            get(meditation::get_guided_meditations),
        )
        .route("/api/meditation/music", get(meditation::get_meditation_music))
        .route("/api/meditation/log", post(meditation::log_session))
        .route("/api/meditation/stats", get(meditation::get_stats))
        .route("/api/meditation/reminders", get(meditation::get_reminders))
        // Spiritual
        .route("/api/spiritual/quote", get(spiritual::get_spiritual_quote))
        .route(
            "/api/spiritual/guidance",
            post(spiritual::get_spiritual_guidance),
        )
        .route(
            "/api/spiritual/scriptures",
            get(spiritual::get_scripture_references),
        )
        .route(
            "/api/spiritual/practices",
            get(spiritual::get_spiritual_practices),
        )
        .route(
            "/api/spiritual/affirmations",
            get(spiritual::get_daily_affirmations),
        )
        .route("/api/spiritual/videos", get(spiritual::get_spiritual_videos))
        // Meta
        .route("/health", get(health_check))
        .fallback(fallback_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe with the running version
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn fallback_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Not Found"})),
    )
}
