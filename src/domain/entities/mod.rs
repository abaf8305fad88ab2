pub mod directory;
pub mod filter;
pub mod pagination;
pub mod query_string;
pub mod table;
pub mod update;
pub mod validation;
