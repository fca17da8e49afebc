/**
 * Community Endpoints
 *
 * Peer-support posts with comments and likes. Posts are soft-deleted
 * (status flips to "deleted") so likes and comments keep their
 * references. Counter updates are plain read-modify-write; concurrent
 * likes can lose an increment and that is accepted.
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::community::moderation::is_content_inappropriate;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::{fields, Fields};

pub const POSTS_COLLECTION: &str = "community_posts";
pub const COMMENTS_COLLECTION: &str = "comments";
pub const LIKES_COLLECTION: &str = "likes";

const MAX_PAGE_SIZE: usize = 100;

#[derive(Deserialize, Debug)]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub anonymous: bool,
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_name: String,
    pub author_id: Option<String>,
    pub created_at: String,
    pub likes: i64,
    pub comments_count: i64,
}

#[derive(Deserialize, Debug)]
pub struct CommentCreateRequest {
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author_name: String,
    pub author_id: Option<String>,
    pub created_at: String,
    pub likes: i64,
}

#[derive(Deserialize, Debug)]
pub struct PageParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_page_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_page_limit() -> usize {
    20
}

/// Create a community post
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<PostCreateRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    if request.title.is_empty() || request.title.chars().count() > 200 {
        return Err(ApiError::bad_request("Title must be 1-200 characters"));
    }
    if request.content.is_empty() || request.content.chars().count() > 5000 {
        return Err(ApiError::bad_request("Content must be 1-5000 characters"));
    }

    if is_content_inappropriate(&state.ai, &request.content).await {
        tracing::warn!("Post rejected by moderation for user {}", claims.sub);
        return Err(ApiError::bad_request("Post contains inappropriate content"));
    }

    let sentiment = state.ai.analyze_sentiment(&request.content).await;

    let created_at = chrono::Utc::now().to_rfc3339();
    let post_id = format!("post_{created_at}");
    let (author_id, author_name) = author_of(&claims.sub, claims.display_name.as_deref(), request.anonymous);

    let doc = fields([
        ("title", json!(request.title)),
        ("content", json!(request.content)),
        ("category", json!(request.category)),
        ("author_id", author_id.clone().map(Value::String).unwrap_or(Value::Null)),
        ("author_name", json!(author_name)),
        ("created_at", json!(created_at)),
        ("likes", json!(0)),
        ("comments_count", json!(0)),
        ("sentiment", json!(sentiment)),
        ("status", json!("active")),
    ]);

    state.store.save(POSTS_COLLECTION, &post_id, doc.clone()).await?;

    tracing::info!("Post created: {post_id}");

    Ok(Json(post_response(&post_id, &doc)))
}

/// List active posts, newest first, with optional category filter
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let limit = params.limit.min(MAX_PAGE_SIZE);

    let mut filter = fields([("status", json!("active"))]);
    if let Some(category) = &params.category {
        filter.insert("category".to_string(), json!(category));
    }

    let mut rows = state
        .store
        .query(POSTS_COLLECTION, &filter, limit.saturating_add(params.offset))
        .await?;

    rows.sort_by(|a, b| str_of(b, "created_at").cmp(&str_of(a, "created_at")));

    let posts = rows
        .iter()
        .skip(params.offset)
        .take(limit)
        .map(|row| post_response(&str_of(row, "id"), row))
        .collect();

    Ok(Json(posts))
}

/// Get one post; soft-deleted posts read as absent
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .store
        .get(POSTS_COLLECTION, &post_id)
        .await?
        .filter(|doc| str_of(doc, "status") == "active")
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(post_response(&post_id, &post)))
}

/// Add a comment to a post
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<String>,
    Json(request): Json<CommentCreateRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    if request.content.is_empty() || request.content.chars().count() > 1000 {
        return Err(ApiError::bad_request("Comment must be 1-1000 characters"));
    }

    let mut post = state
        .store
        .get(POSTS_COLLECTION, &post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if is_content_inappropriate(&state.ai, &request.content).await {
        tracing::warn!("Comment rejected by moderation for user {}", claims.sub);
        return Err(ApiError::bad_request(
            "Comment contains inappropriate content",
        ));
    }

    let created_at = chrono::Utc::now().to_rfc3339();
    let comment_id = format!("comment_{created_at}");
    let (author_id, author_name) = author_of(&claims.sub, claims.display_name.as_deref(), request.anonymous);

    let doc = fields([
        ("post_id", json!(post_id)),
        ("content", json!(request.content)),
        ("author_id", author_id.clone().map(Value::String).unwrap_or(Value::Null)),
        ("author_name", json!(author_name)),
        ("created_at", json!(created_at)),
        ("likes", json!(0)),
        ("status", json!("active")),
    ]);

    state
        .store
        .save(COMMENTS_COLLECTION, &comment_id, doc.clone())
        .await?;

    // Counter bump is a read-modify-write with no transactional guard
    let count = int_of(&post, "comments_count") + 1;
    post.insert("comments_count".to_string(), json!(count));
    post.remove("id");
    state.store.save(POSTS_COLLECTION, &post_id, post).await?;

    Ok(Json(CommentResponse {
        id: comment_id,
        post_id: str_of(&doc, "post_id"),
        content: str_of(&doc, "content"),
        author_name: str_of(&doc, "author_name"),
        author_id,
        created_at,
        likes: 0,
    }))
}

/// List comments for a post, oldest first
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let limit = params.limit.min(MAX_PAGE_SIZE);

    let filter = fields([("post_id", json!(post_id)), ("status", json!("active"))]);
    let mut rows = state
        .store
        .query(COMMENTS_COLLECTION, &filter, limit.saturating_add(params.offset))
        .await?;

    rows.sort_by(|a, b| str_of(a, "created_at").cmp(&str_of(b, "created_at")));

    let comments = rows
        .iter()
        .skip(params.offset)
        .take(limit)
        .map(|row| CommentResponse {
            id: str_of(row, "id"),
            post_id: str_of(row, "post_id"),
            content: str_of(row, "content"),
            author_name: str_of(row, "author_name"),
            author_id: row
                .get("author_id")
                .and_then(Value::as_str)
                .map(str::to_string),
            created_at: str_of(row, "created_at"),
            likes: int_of(row, "likes"),
        })
        .collect();

    Ok(Json(comments))
}

/// Like a post; a second like from the same user is rejected
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut post = state
        .store
        .get(POSTS_COLLECTION, &post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let like_id = format!("like_{}_{post_id}", claims.sub);
    if state.store.get(LIKES_COLLECTION, &like_id).await?.is_some() {
        return Err(ApiError::bad_request("Already liked this post"));
    }

    let doc = fields([
        ("user_id", json!(claims.sub)),
        ("post_id", json!(post_id)),
        ("created_at", json!(chrono::Utc::now().to_rfc3339())),
    ]);
    state.store.save(LIKES_COLLECTION, &like_id, doc).await?;

    let likes = int_of(&post, "likes") + 1;
    post.insert("likes".to_string(), json!(likes));
    post.remove("id");
    state.store.save(POSTS_COLLECTION, &post_id, post).await?;

    Ok(Json(json!({"message": "Post liked successfully", "likes": likes})))
}

/// Remove a like; fails if the user never liked the post
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut post = state
        .store
        .get(POSTS_COLLECTION, &post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let like_id = format!("like_{}_{post_id}", claims.sub);
    if state.store.get(LIKES_COLLECTION, &like_id).await?.is_none() {
        return Err(ApiError::bad_request("Post not liked"));
    }

    state.store.delete(LIKES_COLLECTION, &like_id).await?;

    let likes = (int_of(&post, "likes") - 1).max(0);
    post.insert("likes".to_string(), json!(likes));
    post.remove("id");
    state.store.save(POSTS_COLLECTION, &post_id, post).await?;

    Ok(Json(json!({"message": "Post unliked successfully", "likes": likes})))
}

/// Soft-delete a post; only its author may do so
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut post = state
        .store
        .get(POSTS_COLLECTION, &post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let author = post.get("author_id").and_then(Value::as_str);
    if author != Some(claims.sub.as_str()) {
        return Err(ApiError::forbidden("You can only delete your own posts"));
    }

    post.insert("status".to_string(), json!("deleted"));
    post.insert(
        "deleted_at".to_string(),
        json!(chrono::Utc::now().to_rfc3339()),
    );
    post.remove("id");
    state.store.save(POSTS_COLLECTION, &post_id, post).await?;

    tracing::info!("Post soft-deleted: {post_id}");

    Ok(Json(json!({"message": "Post deleted successfully"})))
}

// Helpers

fn author_of(uid: &str, display_name: Option<&str>, anonymous: bool) -> (Option<String>, String) {
    if anonymous {
        (None, "Anonymous".to_string())
    } else {
        (
            Some(uid.to_string()),
            display_name.unwrap_or("User").to_string(),
        )
    }
}

fn post_response(post_id: &str, doc: &Fields) -> PostResponse {
    PostResponse {
        id: post_id.to_string(),
        title: str_of(doc, "title"),
        content: str_of(doc, "content"),
        category: doc
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or("general")
            .to_string(),
        author_name: doc
            .get("author_name")
            .and_then(Value::as_str)
            .unwrap_or("Anonymous")
            .to_string(),
        author_id: doc
            .get("author_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        created_at: str_of(doc, "created_at"),
        likes: int_of(doc, "likes"),
        comments_count: int_of(doc, "comments_count"),
    }
}

fn str_of(doc: &Fields, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn int_of(doc: &Fields, key: &str) -> i64 {
    doc.get(key).and_then(Value::as_i64).unwrap_or(0)
}
