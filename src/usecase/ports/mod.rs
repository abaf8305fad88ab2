pub mod query_store;
pub mod repo;
