use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use santia_core::collections::{self, LIST_LIMIT};
use santia_core::error::ValidationError;
use santia_core::models::intake::{IntakeCreate, IntakeRecord};
use santia_core::models::status_check::{StatusCheck, StatusCheckCreate};
use santia_storage::error::StorageError;
use santia_storage::store::{Document, DocumentStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StorageError),

    #[error("failed to encode {collection} document: {source}")]
    Encode {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("corrupt document in {collection}: {source}")]
    CorruptDocument {
        collection: &'static str,
        source: serde_json::Error,
    },
}

/// Validates submissions, stores them, and serves bounded listings of
/// the `status_checks` and `intakes` collections.
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn DocumentStore>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn submit_status(&self, input: StatusCheckCreate) -> Result<StatusCheck, ServiceError> {
        let check = StatusCheck::new(input)?;
        self.insert(collections::STATUS_CHECKS, &check).await?;

        tracing::info!(id = %check.id, collection = collections::STATUS_CHECKS, "status check recorded");
        Ok(check)
    }

    pub async fn list_statuses(&self) -> Result<Vec<StatusCheck>, ServiceError> {
        self.list(collections::STATUS_CHECKS).await
    }

    /// Fails with [`ValidationError::ConsentRequired`] before touching the
    /// store when the submission does not carry consent.
    pub async fn submit_intake(&self, input: IntakeCreate) -> Result<IntakeRecord, ServiceError> {
        let record = IntakeRecord::new(input)?;
        self.insert(collections::INTAKES, &record).await?;

        tracing::info!(id = %record.id, collection = collections::INTAKES, "intake recorded");
        Ok(record)
    }

    pub async fn list_intakes(&self) -> Result<Vec<IntakeRecord>, ServiceError> {
        self.list(collections::INTAKES).await
    }

    async fn insert<T: Serialize>(
        &self,
        collection: &'static str,
        record: &T,
    ) -> Result<(), ServiceError> {
        let document = match serde_json::to_value(record) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                let source = serde::ser::Error::custom("record is not a JSON object");
                return Err(ServiceError::Encode { collection, source });
            }
            Err(source) => return Err(ServiceError::Encode { collection, source }),
        };

        self.store.insert_one(collection, document).await?;
        Ok(())
    }

    async fn list<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>, ServiceError> {
        let documents = self.store.find(collection, LIST_LIMIT).await?;

        documents
            .into_iter()
            .map(|document| {
                serde_json::from_value(Value::Object(document))
                    .map_err(|source| ServiceError::CorruptDocument { collection, source })
            })
            .collect()
    }
}
