pub mod collection_name;
pub mod distance;
pub mod metadata;
