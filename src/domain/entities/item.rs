use crate::domain::values::metadata::Metadata;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One embedded record submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub document: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            embedding,
            metadata: None,
            document: None,
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
