pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;
pub mod telemetry;

use crate::application::delete::{DeleteOutcome, DeleteUseCase};
use crate::application::query::QueryUseCase;
use crate::application::upsert::UpsertUseCase;
use crate::domain::entities::item::Item;
use crate::domain::entities::query_hit::QueryHit;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_store::EmbeddingStore;
use crate::infrastructure::sqlite::embedding_store::SqliteEmbeddingStore;
use std::sync::Arc;

/// Name reported by the liveness endpoint.
pub const SERVICE_NAME: &str = "chroma";

/// Process-wide gateway over one embedding store. Built once at startup and
/// shared by every request handler.
pub struct ChromaGateway {
    upsert_uc: UpsertUseCase,
    query_uc: QueryUseCase,
    delete_uc: DeleteUseCase,
}

impl ChromaGateway {
    pub fn new(persist_path: &str) -> Result<Self, DomainError> {
        let store = SqliteEmbeddingStore::open(persist_path)?;
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn EmbeddingStore>) -> Self {
        Self {
            upsert_uc: UpsertUseCase::new(store.clone()),
            query_uc: QueryUseCase::new(store.clone()),
            delete_uc: DeleteUseCase::new(store),
        }
    }

    pub async fn upsert(&self, collection: String, items: Vec<Item>) -> Result<usize, DomainError> {
        let uc = self.upsert_uc.clone();
        run_blocking(move || uc.execute(&collection, items)).await
    }

    pub async fn query(
        &self,
        collection: String,
        query_embedding: Vec<f32>,
        n_results: usize,
    ) -> Result<Vec<QueryHit>, DomainError> {
        let uc = self.query_uc.clone();
        run_blocking(move || uc.execute(&collection, query_embedding, n_results)).await
    }

    pub async fn delete(&self, collection: String, ids: Vec<String>) -> DeleteOutcome {
        let uc = self.delete_uc.clone();
        run_blocking(move || uc.execute(&collection, &ids)).await.into()
    }
}

/// Runs a store call on the blocking pool. A panicked or cancelled task is
/// reported as a store error.
async fn run_blocking<T, F>(f: F) -> Result<T, DomainError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::Store(format!("store task failed: {e}")))?
}
