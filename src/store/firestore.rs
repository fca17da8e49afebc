/**
 * Firestore Document Store
 *
 * Production `DocumentStore` backend speaking the Firestore REST API.
 *
 * # Wire Format
 *
 * Firestore documents carry typed values ("stringValue", "integerValue",
 * and so on) rather than plain JSON. This module converts between the
 * loosely-typed `Fields` maps handlers use and the Firestore encoding in
 * both directions. Integer values travel as strings on the wire.
 *
 * # Operations
 *
 * - `get`    - `GET  {base}/{collection}/{id}`
 * - `save`   - `PATCH {base}/{collection}/{id}` with no update mask,
 *              which replaces the whole document (overwrite semantics)
 * - `query`  - `POST {base}:runQuery` with an equality-only
 *              `structuredQuery`
 * - `delete` - `DELETE {base}/{collection}/{id}`, preceded by a `get`
 *              so the caller learns whether the document existed
 *
 * Requests authenticate with a bearer access token provided through
 * configuration. There is no retry logic; a failed call surfaces as a
 * `StoreError` and becomes a generic server error at the API boundary.
 */

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::{DocumentStore, Fields, StoreError};

/// Firestore REST backend
pub struct FirestoreStore {
    client: reqwest::Client,
    /// Document root, e.g.
    /// `https://firestore.googleapis.com/v1/projects/{p}/databases/(default)/documents`
    base_url: String,
    access_token: String,
}

impl FirestoreStore {
    /// Build a store for the given project
    ///
    /// `base_url_override` replaces the Google endpoint (used in tests).
    pub fn new(
        project_id: &str,
        access_token: String,
        base_url_override: Option<String>,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StoreError::request(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url_override.unwrap_or_else(|| {
            format!(
                "https://firestore.googleapis.com/v1/projects/{project_id}/databases/(default)/documents"
            )
        });

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }
}

/// Encode a JSON value into the Firestore typed-value representation
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(encoded)
}

/// Decode a Firestore typed value back into plain JSON
fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let obj = value
        .as_object()
        .ok_or_else(|| StoreError::malformed("typed value is not an object"))?;

    if let Some((kind, inner)) = obj.iter().next() {
        match kind.as_str() {
            "nullValue" => Ok(Value::Null),
            "booleanValue" => Ok(inner.clone()),
            "integerValue" => {
                let raw = inner
                    .as_str()
                    .ok_or_else(|| StoreError::malformed("integerValue is not a string"))?;
                let n: i64 = raw
                    .parse()
                    .map_err(|_| StoreError::malformed("unparseable integerValue"))?;
                Ok(json!(n))
            }
            "doubleValue" => Ok(inner.clone()),
            "stringValue" | "timestampValue" | "referenceValue" => Ok(inner.clone()),
            "arrayValue" => {
                let items = inner
                    .get("values")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let decoded: Result<Vec<Value>, StoreError> =
                    items.iter().map(decode_value).collect();
                Ok(Value::Array(decoded?))
            }
            "mapValue" => {
                let inner_fields = inner.get("fields").cloned().unwrap_or_else(|| json!({}));
                Ok(Value::Object(decode_fields(&inner_fields)?))
            }
            other => Err(StoreError::malformed(format!("unknown value kind: {other}"))),
        }
    } else {
        Err(StoreError::malformed("empty typed value"))
    }
}

fn decode_fields(fields: &Value) -> Result<Fields, StoreError> {
    let obj = fields
        .as_object()
        .ok_or_else(|| StoreError::malformed("fields is not an object"))?;

    let mut decoded = Fields::new();
    for (key, typed) in obj {
        decoded.insert(key.clone(), decode_value(typed)?);
    }
    Ok(decoded)
}

/// Pull the document id out of a Firestore resource name
///
/// Resource names look like `projects/p/databases/(default)/documents/
/// {collection}/{id}`; the id is the final path segment.
fn id_from_name(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    fn backend_tag(&self) -> &'static str {
        "firestore"
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::request(format!("get failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::request(format!(
                "get returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("get body: {e}")))?;
        let fields = body.get("fields").cloned().unwrap_or_else(|| json!({}));
        Ok(Some(decode_fields(&fields)?))
    }

    async fn save(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self
            .client
            .patch(self.document_url(collection, id))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::request(format!("save failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StoreError::request(format!(
                "save returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &Fields,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError> {
        let field_filters: Vec<Value> = filters
            .iter()
            .map(|(field, value)| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": encode_value(value),
                    }
                })
            })
            .collect();

        let mut structured_query = json!({
            "from": [{ "collectionId": collection }],
            "limit": limit,
        });
        if !field_filters.is_empty() {
            structured_query["where"] = json!({
                "compositeFilter": { "op": "AND", "filters": field_filters }
            });
        }

        let response = self
            .client
            .post(format!("{}:runQuery", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await
            .map_err(|e| StoreError::request(format!("query failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StoreError::request(format!(
                "query returned {}",
                response.status()
            )));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("query body: {e}")))?;

        let mut results = Vec::new();
        for row in rows {
            // runQuery streams one object per result; rows without a
            // "document" key are progress markers
            let Some(document) = row.get("document") else {
                continue;
            };
            let fields = document.get("fields").cloned().unwrap_or_else(|| json!({}));
            let mut decoded = decode_fields(&fields)?;
            if let Some(name) = document.get("name").and_then(Value::as_str) {
                decoded.insert("id".to_string(), Value::String(id_from_name(name)));
            }
            results.push(decoded);
        }
        Ok(results)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let existed = self.get(collection, id).await?.is_some();

        let response = self
            .client
            .delete(self.document_url(collection, id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::request(format!("delete failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StoreError::request(format!(
                "delete returned {}",
                response.status()
            )));
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!("hi")), json!({ "stringValue": "hi" }));
        assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
        assert_eq!(encode_value(&json!(7)), json!({ "integerValue": "7" }));
        assert_eq!(encode_value(&json!(0.5)), json!({ "doubleValue": 0.5 }));
        assert_eq!(encode_value(&Value::Null), json!({ "nullValue": null }));
    }

    #[test]
    fn test_decode_scalars() {
        assert_eq!(
            decode_value(&json!({ "stringValue": "hi" })).unwrap(),
            json!("hi")
        );
        assert_eq!(
            decode_value(&json!({ "integerValue": "42" })).unwrap(),
            json!(42)
        );
        assert_eq!(
            decode_value(&json!({ "doubleValue": -0.25 })).unwrap(),
            json!(-0.25)
        );
        assert_eq!(decode_value(&json!({ "nullValue": null })).unwrap(), Value::Null);
    }

    #[test]
    fn test_nested_document_round_trip() {
        let original = json!({
            "sentiment": { "sentiment": "neutral", "score": 0.0, "magnitude": 0.0 },
            "likes": 3,
            "tags": ["a", "b"],
            "active": true,
        });
        let fields = original.as_object().unwrap().clone();

        let encoded = encode_fields(&fields);
        let decoded = decode_fields(&encoded).unwrap();
        assert_eq!(Value::Object(decoded), original);
    }

    #[test]
    fn test_id_from_resource_name() {
        let name = "projects/p/databases/(default)/documents/community_posts/post_123";
        assert_eq!(id_from_name(name), "post_123");
    }

    #[test]
    fn test_decode_rejects_unknown_kind() {
        assert!(decode_value(&json!({ "geoPointValue": {} })).is_err());
    }
}
