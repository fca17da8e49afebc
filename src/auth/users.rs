/**
 * User Records
 *
 * Store access for the `users` collection. Documents are loosely typed
 * field maps; this module converts between them and the `UserRecord`
 * struct handlers work with.
 */

use serde_json::{json, Value};

use crate::store::{fields, DocumentStore, Fields, StoreError};

pub const USERS_COLLECTION: &str = "users";

/// A user document
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub preferred_language: String,
    pub password_hash: String,
    pub created_at: String,
}

impl UserRecord {
    /// Build a record from stored fields; missing optional fields take
    /// their defaults
    pub fn from_fields(uid: &str, doc: &Fields) -> Self {
        Self {
            uid: uid.to_string(),
            email: str_field(doc, "email"),
            display_name: doc
                .get("display_name")
                .and_then(Value::as_str)
                .map(str::to_string),
            preferred_language: doc
                .get("preferred_language")
                .and_then(Value::as_str)
                .unwrap_or("en")
                .to_string(),
            password_hash: str_field(doc, "password_hash"),
            created_at: str_field(doc, "created_at"),
        }
    }

    pub fn to_fields(&self) -> Fields {
        fields([
            ("email", json!(self.email)),
            ("display_name", json!(self.display_name)),
            ("preferred_language", json!(self.preferred_language)),
            ("password_hash", json!(self.password_hash)),
            ("created_at", json!(self.created_at)),
        ])
    }
}

fn str_field(doc: &Fields, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Fetch a user by document id
pub async fn get_by_id(
    store: &dyn DocumentStore,
    uid: &str,
) -> Result<Option<UserRecord>, StoreError> {
    Ok(store
        .get(USERS_COLLECTION, uid)
        .await?
        .map(|doc| UserRecord::from_fields(uid, &doc)))
}

/// Look a user up by email via an equality query
pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<UserRecord>, StoreError> {
    let filter = fields([("email", json!(email))]);
    let rows = store.query(USERS_COLLECTION, &filter, 1).await?;

    Ok(rows.first().map(|doc| {
        let uid = doc
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        UserRecord::from_fields(&uid, doc)
    }))
}
