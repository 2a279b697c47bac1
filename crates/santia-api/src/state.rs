use std::sync::Arc;

use santia_storage::memory::MemoryStore;
use santia_storage::store::{DocumentStore, S3DocumentStore};

use crate::config::StoreConfig;
use crate::service::IntakeService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            intake: IntakeService::new(store),
        }
    }
}

/// Open the document store named by the configuration. Called once at startup.
pub async fn connect_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match config {
        StoreConfig::S3 {
            bucket,
            endpoint_url,
            region,
        } => {
            let client = santia_storage::client::build_client(
                endpoint_url.as_deref(),
                region.as_deref(),
            )
            .await;
            tracing::info!(%bucket, endpoint = endpoint_url.as_deref().unwrap_or("aws"), "using S3 document store");
            Arc::new(S3DocumentStore::new(client, bucket.clone()))
        }
        StoreConfig::Memory => {
            tracing::warn!("using in-memory document store; records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    }
}
