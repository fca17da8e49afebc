//! Community API integration tests

mod common;

use axum::http::StatusCode;
use common::{bearer, signup, TestApp};
use pretty_assertions::assert_eq;

async fn create_post(app: &TestApp, token: &str, title: &str) -> String {
    let response = app
        .server
        .post("/api/community/posts")
        .add_header("Authorization", bearer(token))
        .json(&serde_json::json!({
            "title": title,
            "content": "Sharing my experience with mindful walking.",
            "category": "mindfulness"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_post_requires_auth() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/community/posts")
        .json(&serde_json::json!({"title": "Hi", "content": "Hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_fetch_post() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;

    let post_id = create_post(&app, &token, "Mindful walking").await;

    let response = app
        .server
        .get(&format!("/api/community/posts/{post_id}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Mindful walking");
    assert_eq!(body["author_name"], "Test User");
    assert_eq!(body["likes"], 0);
    assert_eq!(body["comments_count"], 0);
}

#[tokio::test]
async fn test_anonymous_post_hides_author() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;

    let response = app
        .server
        .post("/api/community/posts")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({
            "title": "Anonymous story",
            "content": "A story I'd rather not sign.",
            "anonymous": true
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["author_name"], "Anonymous");
    assert!(body["author_id"].is_null());
}

#[tokio::test]
async fn test_post_validation() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;

    let response = app
        .server
        .post("/api/community/posts")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"title": "", "content": "body"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let long_content = "x".repeat(5001);
    let response = app
        .server
        .post("/api/community/posts")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"title": "ok", "content": long_content}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_posts_filters_by_category() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;
    create_post(&app, &token, "About mindfulness").await;

    app.server
        .post("/api/community/posts")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({
            "title": "Sleep tips",
            "content": "What helps you sleep?",
            "category": "sleep"
        }))
        .await;

    let response = app
        .server
        .get("/api/community/posts")
        .add_query_param("category", "sleep")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let posts: serde_json::Value = response.json();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Sleep tips");
}

#[tokio::test]
async fn test_like_twice_is_rejected_and_counter_stable() {
    let app = TestApp::new();
    let token = signup(&app, "liker@example.com").await;
    let post_id = create_post(&app, &token, "Like me").await;

    let first = app
        .server
        .post(&format!("/api/community/posts/{post_id}/like"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let body: serde_json::Value = first.json();
    assert_eq!(body["likes"], 1);

    let second = app
        .server
        .post(&format!("/api/community/posts/{post_id}/like"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = second.json();
    assert_eq!(body["detail"], "Already liked this post");

    // Counter unchanged after the rejected second like
    let post = app
        .server
        .get(&format!("/api/community/posts/{post_id}"))
        .await;
    let body: serde_json::Value = post.json();
    assert_eq!(body["likes"], 1);
}

#[tokio::test]
async fn test_unlike_without_like_is_rejected() {
    let app = TestApp::new();
    let token = signup(&app, "liker@example.com").await;
    let post_id = create_post(&app, &token, "Never liked").await;

    let response = app
        .server
        .delete(&format!("/api/community/posts/{post_id}/like"))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["detail"], "Post not liked");
}

#[tokio::test]
async fn test_unlike_decrements_counter() {
    let app = TestApp::new();
    let token = signup(&app, "liker@example.com").await;
    let post_id = create_post(&app, &token, "Toggle").await;

    app.server
        .post(&format!("/api/community/posts/{post_id}/like"))
        .add_header("Authorization", bearer(&token))
        .await;

    let response = app
        .server
        .delete(&format!("/api/community/posts/{post_id}/like"))
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["likes"], 0);
}

#[tokio::test]
async fn test_comments_bump_count_and_list_oldest_first() {
    let app = TestApp::new();
    let token = signup(&app, "commenter@example.com").await;
    let post_id = create_post(&app, &token, "Discuss").await;

    for content in ["first comment", "second comment"] {
        let response = app
            .server
            .post(&format!("/api/community/posts/{post_id}/comments"))
            .add_header("Authorization", bearer(&token))
            .json(&serde_json::json!({"content": content}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let post = app
        .server
        .get(&format!("/api/community/posts/{post_id}"))
        .await;
    let body: serde_json::Value = post.json();
    assert_eq!(body["comments_count"], 2);

    let comments = app
        .server
        .get(&format!("/api/community/posts/{post_id}/comments"))
        .await;
    let list: serde_json::Value = comments.json();
    let list = list.as_array().unwrap();
    assert_eq!(list[0]["content"], "first comment");
    assert_eq!(list[1]["content"], "second comment");
}

#[tokio::test]
async fn test_delete_post_forbidden_for_non_author() {
    let app = TestApp::new();
    let author = signup(&app, "author@example.com").await;
    let other = signup(&app, "other@example.com").await;
    let post_id = create_post(&app, &author, "Mine").await;

    let response = app
        .server
        .delete(&format!("/api/community/posts/{post_id}"))
        .add_header("Authorization", bearer(&other))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_soft_deleted_post_reads_as_missing() {
    let app = TestApp::new();
    let token = signup(&app, "author@example.com").await;
    let post_id = create_post(&app, &token, "Ephemeral").await;

    let response = app
        .server
        .delete(&format!("/api/community/posts/{post_id}"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The document survives in storage but the API hides it
    assert_eq!(app.store.len("community_posts").await, 1);

    let fetch = app
        .server
        .get(&format!("/api/community/posts/{post_id}"))
        .await;
    assert_eq!(fetch.status_code(), StatusCode::NOT_FOUND);

    let list = app.server.get("/api/community/posts").await;
    let posts: serde_json::Value = list.json();
    assert_eq!(posts.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_posts_with_huge_offset_returns_empty_page() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;
    create_post(&app, &token, "Only post").await;

    let response = app
        .server
        .get("/api/community/posts")
        .add_query_param("offset", usize::MAX.to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let posts: serde_json::Value = response.json();
    assert_eq!(posts.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_comments_with_huge_offset_returns_empty_page() {
    let app = TestApp::new();
    let token = signup(&app, "poster@example.com").await;
    let post_id = create_post(&app, &token, "Commented").await;

    app.server
        .post(&format!("/api/community/posts/{post_id}/comments"))
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"content": "Lovely post"}))
        .await;

    let response = app
        .server
        .get(&format!("/api/community/posts/{post_id}/comments"))
        .add_query_param("offset", usize::MAX.to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let comments: serde_json::Value = response.json();
    assert_eq!(comments.as_array().unwrap().len(), 0);
}
