use crate::application::delete::DeleteOutcome;
use crate::application::query::DEFAULT_N_RESULTS;
use crate::domain::entities::item::Item;
use crate::domain::entities::query_hit::QueryHit;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertRequest {
    #[validate(length(min = 1))]
    pub collection: String,
    #[validate(nested)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 1))]
    pub collection: String,
    pub query_embedding: Vec<f32>,
    #[serde(default = "default_n_results")]
    #[validate(range(min = 1))]
    pub n_results: usize,
}

fn default_n_results() -> usize {
    DEFAULT_N_RESULTS
}

/// Only the shape is checked here. Name faults are reported by the store and
/// come back inline in the delete response.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteRequest {
    pub collection: String,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpsertResponse {
    pub ok: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub results: Vec<QueryHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted { deleted } => DeleteResponse {
                ok: true,
                deleted: Some(deleted),
                error: None,
            },
            DeleteOutcome::Failed { error } => DeleteResponse {
                ok: false,
                deleted: None,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
}
