pub mod directory_service;
pub mod filter_sync;
pub mod pagination_sync;
pub mod url_state;
