// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod helpdesk_client;
pub mod kv_store;
pub mod store_api_client;
