pub mod collection;
pub mod item;
pub mod query_hit;
