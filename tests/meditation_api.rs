//! Meditation API integration tests

mod common;

use axum::http::StatusCode;
use common::{bearer, signup, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_script_generation_falls_back_without_model() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/meditation/script")
        .json(&serde_json::json!({"duration": 10, "focus": "sleep"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let script = body["script"].as_str().unwrap();
    assert!(script.contains("10-minute"));
    assert_eq!(body["duration"], 10);
    assert_eq!(body["focus"], "sleep");

    // Anonymous requests leave no history behind
    assert_eq!(app.store.len("meditation_history").await, 0);
}

#[tokio::test]
async fn test_script_generation_records_history_when_authenticated() {
    let app = TestApp::new();
    let token = signup(&app, "meditator@example.com").await;

    let response = app
        .server
        .post("/api/meditation/script")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.store.len("meditation_history").await, 1);
}

#[tokio::test]
async fn test_breathing_exercise_lookup_and_fallback() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/meditation/breathing")
        .add_query_param("type", "box")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["exercise"]["name"], "Box Breathing");

    let response = app
        .server
        .get("/api/meditation/breathing")
        .add_query_param("type", "unknown-kind")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["exercise"]["name"], "4-7-8 Breathing");
}

#[tokio::test]
async fn test_guided_and_music_catalogs() {
    let app = TestApp::new();

    let guided: serde_json::Value = app.server.get("/api/meditation/guided").await.json();
    assert_eq!(guided["meditations"].as_array().unwrap().len(), 6);

    let music: serde_json::Value = app.server.get("/api/meditation/music").await.json();
    assert_eq!(music["tracks"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_log_session_updates_running_stats() {
    let app = TestApp::new();
    let token = signup(&app, "meditator@example.com").await;

    let response = app
        .server
        .post("/api/meditation/log")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({
            "duration": 15,
            "type": "mindfulness",
            "mood_before": 4,
            "mood_after": 7
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["stats"]["total_sessions"], 1);
    assert_eq!(body["stats"]["total_minutes"], 15);
    assert_eq!(body["stats"]["streak_days"], 1);
    assert_eq!(body["stats"]["mood_improvement"], 3);

    // A second session the same day extends the streak
    let response = app
        .server
        .post("/api/meditation/log")
        .add_header("Authorization", bearer(&token))
        .json(&serde_json::json!({"duration": 5, "type": "breathing"}))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["stats"]["total_sessions"], 2);
    assert_eq!(body["stats"]["total_minutes"], 20);
    assert_eq!(body["stats"]["streak_days"], 2);
}

#[tokio::test]
async fn test_stats_aggregation() {
    let app = TestApp::new();
    let token = signup(&app, "meditator@example.com").await;

    for (duration, kind) in [(10, "mindfulness"), (20, "mindfulness"), (6, "sleep")] {
        app.server
            .post("/api/meditation/log")
            .add_header("Authorization", bearer(&token))
            .json(&serde_json::json!({
                "duration": duration,
                "type": kind,
                "mood_before": 5,
                "mood_after": 7
            }))
            .await;
    }

    let response = app
        .server
        .get("/api/meditation/stats")
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_sessions"], 3);
    assert_eq!(body["total_minutes"], 36);
    assert_eq!(body["average_session_length"], 12.0);
    assert_eq!(body["favorite_type"], "mindfulness");
    assert_eq!(body["mood_improvement_average"], 2.0);
}

#[tokio::test]
async fn test_stats_empty_for_new_user() {
    let app = TestApp::new();
    let token = signup(&app, "fresh@example.com").await;

    let response = app
        .server
        .get("/api/meditation/stats")
        .add_header("Authorization", bearer(&token))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_sessions"], 0);
    assert!(body["favorite_type"].is_null());
}

#[tokio::test]
async fn test_reminders_default_when_unset() {
    let app = TestApp::new();
    let token = signup(&app, "meditator@example.com").await;

    let response = app
        .server
        .get("/api/meditation/reminders")
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["enabled"], false);
    assert_eq!(body["times"], serde_json::json!(["08:00", "20:00"]));
    assert_eq!(body["days"].as_array().unwrap().len(), 7);
}
