//! Firestore adapter tests against a mock HTTP server
//!
//! These pin the wire format: typed-value encoding on writes, decoding
//! on reads, structured queries, and the not-found mapping. The mock
//! replaces the Google endpoint through the base URL override.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zenith_backend::store::{fields, DocumentStore, FirestoreStore};

fn store_for(server: &MockServer) -> FirestoreStore {
    // Mirror the real endpoint shape so ":runQuery" lands on the path
    let base = format!("{}/documents", server.uri());
    FirestoreStore::new("test-project", "test-token".to_string(), Some(base))
        .expect("store should build")
}

#[tokio::test]
async fn test_get_decodes_typed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/test-project/databases/(default)/documents/users/u1",
            "fields": {
                "email": { "stringValue": "asha@example.com" },
                "streak_days": { "integerValue": "4" },
                "active": { "booleanValue": true },
            }
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let doc = store.get("users", "u1").await.unwrap().unwrap();

    assert_eq!(doc.get("email"), Some(&json!("asha@example.com")));
    assert_eq!(doc.get("streak_days"), Some(&json!(4)));
    assert_eq!(doc.get("active"), Some(&json!(true)));
}

#[tokio::test]
async fn test_get_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/users/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(store.get("users", "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_sends_typed_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/documents/users/u1"))
        .and(body_partial_json(json!({
            "fields": {
                "email": { "stringValue": "asha@example.com" },
                "streak_days": { "integerValue": "4" },
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let doc = fields([
        ("email", json!("asha@example.com")),
        ("streak_days", json!(4)),
    ]);
    store.save("users", "u1", doc).await.unwrap();
}

#[tokio::test]
async fn test_save_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let result = store.save("users", "u1", fields([("a", json!(1))])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_query_injects_document_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents:runQuery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "document": {
                    "name": "projects/test-project/databases/(default)/documents/community_posts/post_1",
                    "fields": { "title": { "stringValue": "First" } }
                }
            },
            { "readTime": "2026-01-01T00:00:00Z" },
            {
                "document": {
                    "name": "projects/test-project/databases/(default)/documents/community_posts/post_2",
                    "fields": { "title": { "stringValue": "Second" } }
                }
            }
        ])))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let filter = fields([("status", json!("active"))]);
    let rows = store.query("community_posts", &filter, 10).await.unwrap();

    // The readTime progress marker is skipped
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id"), Some(&json!("post_1")));
    assert_eq!(rows[1].get("id"), Some(&json!("post_2")));
}

#[tokio::test]
async fn test_delete_reports_prior_existence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/test-project/databases/(default)/documents/users/u1",
            "fields": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/documents/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(store.delete("users", "u1").await.unwrap());
}
