use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::error::StoreError;
use crate::core::store::{Document, DocumentStore};

/// Client for the remote document store's JSON-over-HTTP surface:
/// `POST /v1/<collection>`, `GET /v1/<collection>`,
/// `PATCH /v1/<collection>/<id>`, `DELETE /v1/<collection>/<id>`.
pub struct RestStore {
    base_url: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("moneta/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(RestStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{collection}", self.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{collection}/{id}", self.base_url)
    }
}

fn check_status(resp: &reqwest::Response, operation: &str) -> Result<(), StoreError> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(StoreError::Status {
            status: resp.status().as_u16(),
            operation: operation.to_string(),
        })
    }
}

fn malformed(collection: &str, reason: &str) -> StoreError {
    StoreError::MalformedRecord {
        collection: collection.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn create(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        debug!("Creating record in {url}");
        let resp = self.client.post(&url).json(fields).send().await?;
        check_status(&resp, &format!("POST {collection}"))?;

        let body: Value = resp.json().await?;
        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| malformed(collection, "create response is missing 'id'"))
    }

    async fn read_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection);
        debug!("Reading all records from {url}");
        let resp = self.client.get(&url).send().await?;
        check_status(&resp, &format!("GET {collection}"))?;

        let body: Value = resp.json().await?;
        let records = body
            .as_array()
            .ok_or_else(|| malformed(collection, "expected a JSON array of records"))?;

        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let Some(object) = record.as_object() else {
                return Err(malformed(collection, "record is not a JSON object"));
            };
            let id = object
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed(collection, "record is missing 'id'"))?
                .to_string();
            let mut fields = object.clone();
            fields.remove("id");
            documents.push(Document { id, fields });
        }
        Ok(documents)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        debug!("Updating record at {url}");
        let resp = self.client.patch(&url).json(fields).send().await?;
        check_status(&resp, &format!("PATCH {collection}/{id}"))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        debug!("Deleting record at {url}");
        let resp = self.client.delete(&url).send().await?;
        check_status(&resp, &format!("DELETE {collection}/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let mock_server = MockServer::start().await;
        let record = json!({"description": "Salary", "amount": "1000"});

        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .and(body_json(&record))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc123"})))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        let id = store.create("transactions", &fields(record)).await.unwrap();
        assert_eq!(id, "abc123");
    }

    #[tokio::test]
    async fn test_create_response_without_id_is_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        let result = store.create("transactions", &fields(json!({"a": 1}))).await;
        assert!(matches!(
            result.unwrap_err(),
            StoreError::MalformedRecord { .. }
        ));
    }

    #[tokio::test]
    async fn test_read_all_splits_id_from_fields() {
        let mock_server = MockServer::start().await;
        let body = json!([
            {"id": "t1", "description": "Salary", "amount": 1000},
            {"id": "t2", "description": "Groceries", "amount": "-42.5"}
        ]);
        Mock::given(method("GET"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        let docs = store.read_all("transactions").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "t1");
        assert!(docs[0].fields.get("id").is_none());
        assert_eq!(docs[1].fields["amount"], json!("-42.5"));
    }

    #[tokio::test]
    async fn test_read_all_rejects_non_array_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        let result = store.read_all("transactions").await;
        assert!(matches!(
            result.unwrap_err(),
            StoreError::MalformedRecord { .. }
        ));
    }

    #[tokio::test]
    async fn test_http_error_is_classified_with_operation() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/transactions/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        let result = store
            .update("transactions", "missing", &fields(json!({"amount": "1"})))
            .await;
        match result.unwrap_err() {
            StoreError::Status { status, operation } => {
                assert_eq!(status, 404);
                assert_eq!(operation, "PATCH transactions/missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_no_content() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/transactions/t1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let store = RestStore::new(&mock_server.uri()).unwrap();
        store.delete("transactions", "t1").await.unwrap();
    }
}
