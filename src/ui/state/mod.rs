pub mod app_state;
pub mod filter_context;
pub mod pagination_params;
pub mod router_store;
