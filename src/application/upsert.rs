use crate::domain::entities::collection::CollectionConfig;
use crate::domain::entities::item::Item;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_store::{AddBatch, EmbeddingStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct UpsertUseCase {
    store: Arc<dyn EmbeddingStore>,
}

impl UpsertUseCase {
    pub fn new(store: Arc<dyn EmbeddingStore>) -> Self {
        Self { store }
    }

    /// Returns the number of items submitted, overwrites included.
    pub fn execute(&self, collection: &str, items: Vec<Item>) -> Result<usize, DomainError> {
        let col = self
            .store
            .get_or_create_collection(collection, Some(CollectionConfig::cosine()))?;

        let count = items.len();
        let mut batch = AddBatch {
            ids: Vec::with_capacity(count),
            embeddings: Vec::with_capacity(count),
            documents: Vec::with_capacity(count),
            metadatas: Vec::with_capacity(count),
        };
        for item in items {
            batch.ids.push(item.id);
            batch.embeddings.push(item.embedding);
            batch.documents.push(item.document);
            batch.metadatas.push(item.metadata);
        }

        self.store.add(&col, batch)?;
        Ok(count)
    }
}
