use crate::domain::entities::query_hit::QueryHit;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_store::{EmbeddingStore, QueryResult};
use std::sync::Arc;

pub const DEFAULT_N_RESULTS: usize = 5;

#[derive(Clone)]
pub struct QueryUseCase {
    store: Arc<dyn EmbeddingStore>,
}

impl QueryUseCase {
    pub fn new(store: Arc<dyn EmbeddingStore>) -> Self {
        Self { store }
    }

    pub fn execute(
        &self,
        collection: &str,
        query_embedding: Vec<f32>,
        n_results: usize,
    ) -> Result<Vec<QueryHit>, DomainError> {
        let col = self.store.get_or_create_collection(collection, None)?;
        let raw = self.store.query(&col, &[query_embedding], n_results)?;
        reshape(raw)
    }
}

/// Turns the first row of the store's parallel arrays into ranked records.
fn reshape(raw: QueryResult) -> Result<Vec<QueryHit>, DomainError> {
    let QueryResult {
        ids,
        distances,
        documents,
        metadatas,
    } = raw;

    let (Some(ids), Some(distances), Some(documents), Some(metadatas)) = (
        ids.into_iter().next(),
        distances.into_iter().next(),
        documents.into_iter().next(),
        metadatas.into_iter().next(),
    ) else {
        return Ok(vec![]);
    };

    let n = ids.len();
    if distances.len() != n || documents.len() != n || metadatas.len() != n {
        return Err(DomainError::Store(format!(
            "malformed query response: {} ids, {} distances, {} documents, {} metadatas",
            n,
            distances.len(),
            documents.len(),
            metadatas.len()
        )));
    }

    Ok(ids
        .into_iter()
        .zip(distances)
        .zip(documents)
        .zip(metadatas)
        .map(|(((id, distance), document), metadata)| QueryHit {
            id,
            distance,
            document,
            metadata,
        })
        .collect())
}
