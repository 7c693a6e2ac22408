//! Document store abstraction.
//!
//! The remote store is opaque: named collections of JSON documents with
//! store-assigned string ids. There is no schema enforcement beyond field
//! presence, so record decoding lives with the domain types.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::error::StoreError;

pub const TRANSACTIONS: &str = "transactions";
pub const CATEGORIES: &str = "categories";

/// A raw document: the store-assigned id plus its data fields.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a record and returns the id the store assigned to it.
    async fn create(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError>;

    /// Reads every record in the collection, in store order.
    async fn read_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Replaces the given fields of an existing record.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
