use async_trait::async_trait;
use aws_sdk_s3::Client;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use uuid::Uuid;

use santia_core::collections;

use crate::error::StorageError;
use crate::objects;

/// A schema-free document: a JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the store-assigned identifier. Never returned by reads.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Number of object fetches kept in flight while listing a collection.
const FETCH_CONCURRENCY: usize = 16;

/// Persistence addressed by collection name.
///
/// Implementations are shared across concurrent requests; each call is
/// independent and no ordering is promised between documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document. Returns the internal identifier assigned to it.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<String, StorageError>;

    /// Return up to `limit` documents from a collection, in no particular
    /// order, with [`INTERNAL_ID_FIELD`] removed.
    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StorageError>;
}

pub fn new_internal_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn strip_internal_id(mut document: Document) -> Document {
    document.remove(INTERNAL_ID_FIELD);
    document
}

/// Document store backed by an S3 bucket, one JSON object per document
/// under `<collection>/<internal id>.json`.
#[derive(Clone)]
pub struct S3DocumentStore {
    client: Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn fetch(&self, key: String) -> Result<Option<Document>, StorageError> {
        let fetched = objects::get_object(&self.client, &self.bucket, &key).await;
        settle_fetch(&key, fetched)
    }
}

/// Turn the outcome of fetching one listed object into a document.
/// An object removed between list and get yields `None`.
fn settle_fetch(
    key: &str,
    fetched: Result<Vec<u8>, StorageError>,
) -> Result<Option<Document>, StorageError> {
    match fetched {
        Ok(body) => decode_document(key, &body).map(Some),
        Err(StorageError::NotFound { key }) => {
            tracing::debug!(%key, "document vanished during listing");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Decode a stored object body, dropping [`INTERNAL_ID_FIELD`].
pub fn decode_document(key: &str, body: &[u8]) -> Result<Document, StorageError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(document)) => Ok(strip_internal_id(document)),
        Ok(_) => Err(StorageError::Corrupt {
            key: key.to_string(),
            reason: "not a JSON object".to_string(),
        }),
        Err(e) => Err(StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StorageError> {
        let internal_id = new_internal_id();
        document.insert(INTERNAL_ID_FIELD.to_string(), Value::String(internal_id.clone()));

        let key = collections::document(collection, &internal_id);
        let body = serde_json::to_vec(&Value::Object(document))?;
        objects::put_object(&self.client, &self.bucket, &key, body, Some("application/json"))
            .await?;

        tracing::debug!(bucket = %self.bucket, %key, "document stored");
        Ok(internal_id)
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StorageError> {
        let prefix = collections::prefix(collection);
        let keys = objects::list_objects(&self.client, &self.bucket, &prefix, limit).await?;

        let fetched: Vec<Option<Document>> = stream::iter(keys)
            .map(|key| self.fetch(key))
            .buffered(FETCH_CONCURRENCY)
            .try_collect()
            .await?;

        Ok(fetched.into_iter().flatten().collect())
    }
}
