pub mod location;
pub mod sqlite;
