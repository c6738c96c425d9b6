use crate::domain::entities::collection::{Collection, CollectionConfig};
use crate::domain::error::DomainError;
use crate::domain::values::metadata::Metadata;

/// Parallel sequences for one batched add. Index `i` of every field belongs to
/// the same item.
#[derive(Debug, Clone, Default)]
pub struct AddBatch {
    pub ids: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub documents: Vec<Option<String>>,
    pub metadatas: Vec<Option<Metadata>>,
}

impl AddBatch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Raw query response: one outer row per query embedding, each row ordered by
/// rank (closest first).
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,
    pub distances: Vec<Vec<f32>>,
    pub documents: Vec<Vec<Option<String>>>,
    pub metadatas: Vec<Vec<Option<Metadata>>>,
}

pub trait EmbeddingStore: Send + Sync {
    fn get_or_create_collection(
        &self,
        name: &str,
        config: Option<CollectionConfig>,
    ) -> Result<Collection, DomainError>;

    /// Inserts the batch, replacing any items that share an id.
    fn add(&self, collection: &Collection, batch: AddBatch) -> Result<(), DomainError>;

    fn query(
        &self,
        collection: &Collection,
        query_embeddings: &[Vec<f32>],
        n_results: usize,
    ) -> Result<QueryResult, DomainError>;

    /// Ids not present in the collection are ignored.
    fn delete(&self, collection: &Collection, ids: &[String]) -> Result<(), DomainError>;
}
