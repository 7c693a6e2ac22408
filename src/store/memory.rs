use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::error::StoreError;
use crate::core::store::{Document, DocumentStore};

/// In-memory document store. Backs handler-level tests; ids are assigned
/// sequentially and records keep insertion order, like the remote store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Document>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = format!("mem-{}", inner.next_id);
        debug!("Creating {collection}/{id}");
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields: fields.clone(),
            });
        Ok(id)
    }

    async fn read_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::Status {
                status: 404,
                operation: format!("PATCH {collection}/{id}"),
            })?;
        for (key, value) in fields {
            record.fields.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(docs) = inner.collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
