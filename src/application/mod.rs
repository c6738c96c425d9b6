pub mod delete;
pub mod query;
pub mod upsert;
