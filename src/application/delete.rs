use crate::domain::error::DomainError;
use crate::domain::ports::embedding_store::EmbeddingStore;
use std::sync::Arc;

/// Delete never fails outward: store faults are reported as `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { deleted: usize },
    Failed { error: String },
}

impl From<Result<usize, DomainError>> for DeleteOutcome {
    fn from(result: Result<usize, DomainError>) -> Self {
        match result {
            Ok(deleted) => DeleteOutcome::Deleted { deleted },
            Err(e) => DeleteOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct DeleteUseCase {
    store: Arc<dyn EmbeddingStore>,
}

impl DeleteUseCase {
    pub fn new(store: Arc<dyn EmbeddingStore>) -> Self {
        Self { store }
    }

    /// Returns the number of ids requested, whether or not they were present.
    /// Converted into a `DeleteOutcome` by the caller once the store task has
    /// finished, so that task faults are captured as well.
    pub fn execute(&self, collection: &str, ids: &[String]) -> Result<usize, DomainError> {
        let col = self.store.get_or_create_collection(collection, None)?;
        self.store.delete(&col, ids)?;
        Ok(ids.len())
    }
}
