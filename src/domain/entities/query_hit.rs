use crate::domain::values::metadata::Metadata;
use serde::Serialize;

/// One ranked query result. Absent documents and metadata serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryHit {
    pub id: String,
    pub distance: f32,
    pub document: Option<String>,
    pub metadata: Option<Metadata>,
}
