// Application layer - Use cases and the traits they depend on
pub mod credential_store;
pub mod dashboard_service;
pub mod ports;
pub mod settings_service;
