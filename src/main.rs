// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::credential_store::CredentialStore;
use crate::application::dashboard_service::DashboardService;
use crate::application::ports::KeyValueStore;
use crate::application::settings_service::SettingsService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::helpdesk_client::HelpdeskClient;
use crate::infrastructure::kv_store::{JsonFileStore, MemoryStore};
use crate::infrastructure::store_api_client::StoreApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_json, dashboard_page, health_check, index, refresh_dashboard, save_settings,
    settings_page, test_settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;
    if config.helpdesk.api_token.is_empty() {
        tracing::warn!("helpdesk.api_token is not set; the dashboard will report an authentication error");
    }

    // Create adapters (infrastructure layer)
    let store: Arc<dyn KeyValueStore> = if config.storage.path.is_empty() {
        tracing::info!("Keeping settings in memory");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Keeping settings in {}", config.storage.path);
        Arc::new(JsonFileStore::open(&config.storage.path))
    };
    let helpdesk = Arc::new(HelpdeskClient::new(config.helpdesk.timeout())?);
    let store_api = Arc::new(StoreApiClient::new()?);

    // Create services (application layer)
    let dashboard_service = DashboardService::spawn(
        helpdesk,
        config.helpdesk.endpoint.clone(),
        config.helpdesk.api_token.clone(),
    );
    let settings_service = SettingsService::new(CredentialStore::new(store), store_api);

    // The dashboard's one fetch on mount
    dashboard_service.refresh().await;

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        settings_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/dashboard", get(dashboard_page))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/api/dashboard", get(dashboard_json))
        .route("/settings", get(settings_page).post(save_settings))
        .route("/settings/test", post(test_settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting supportdesk-console on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
