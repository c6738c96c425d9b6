use crate::domain::values::collection_name::CollectionName;
use crate::domain::values::distance::DistanceMetric;
use chrono::{DateTime, Utc};

/// Configuration applied when a collection is first created. Ignored when the
/// collection already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionConfig {
    pub metric: DistanceMetric,
}

impl CollectionConfig {
    pub fn cosine() -> Self {
        Self {
            metric: DistanceMetric::Cosine,
        }
    }
}

/// Handle to a resolved collection.
#[derive(Debug, Clone)]
pub struct Collection {
    pub id: String,
    pub name: CollectionName,
    pub metric: DistanceMetric,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: CollectionName, metric: DistanceMetric) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            metric,
            created_at: Utc::now(),
        }
    }
}
