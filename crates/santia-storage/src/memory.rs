use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::{new_internal_id, strip_internal_id, Document, DocumentStore, INTERNAL_ID_FIELD};

/// Process-local document store. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Documents exactly as held, internal identifier included.
    pub async fn raw_documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StorageError> {
        let internal_id = new_internal_id();
        document.insert(INTERNAL_ID_FIELD.to_string(), Value::String(internal_id.clone()));

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(internal_id)
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        let documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .take(limit)
                    .cloned()
                    .map(strip_internal_id)
                    .collect()
            })
            .unwrap_or_default();

        Ok(documents)
    }
}
