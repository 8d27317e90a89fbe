// HTTP request handlers
use crate::application::settings_service::SAVED_MESSAGE;
use crate::domain::credentials::Credentials;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::outcome::ConnectionTestResult;
use crate::domain::view_state::ViewState;
use crate::presentation::app_state::AppState;
use crate::presentation::views::{self, Notice};
use axum::{
    extract::{Form, State},
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Submitted settings form. No `Debug`: it carries the consumer secret.
#[derive(Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
}

impl From<SettingsForm> for Credentials {
    fn from(form: SettingsForm) -> Self {
        Credentials::new(form.url, form.consumer_key, form.consumer_secret)
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// Dashboard HTML for the current view state
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = state.dashboard_service.snapshot().await;
    Html(views::dashboard_page(&view))
}

/// Same state as the dashboard page, as JSON
pub async fn dashboard_json(
    State(state): State<Arc<AppState>>,
) -> Json<ViewState<DashboardMetrics>> {
    Json(state.dashboard_service.snapshot().await)
}

/// Start a new fetch cycle and go back to the (now loading) dashboard
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> Redirect {
    state.dashboard_service.refresh().await;
    Redirect::to("/dashboard")
}

/// Settings form hydrated from storage
pub async fn settings_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let credentials = state.settings_service.hydrate();
    Html(views::settings_page(&credentials, None))
}

pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SettingsForm>,
) -> Html<String> {
    let credentials = Credentials::from(form);
    let notice = match state.settings_service.save(&credentials) {
        Ok(()) => Notice::Success(SAVED_MESSAGE.to_string()),
        Err(e) => {
            tracing::error!("Saving settings failed: {}", e);
            Notice::Failure(e.to_string())
        }
    };
    Html(views::settings_page(&credentials, Some(&notice)))
}

/// Test the submitted values without saving them
pub async fn test_settings(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SettingsForm>,
) -> Html<String> {
    let credentials = Credentials::from(form);
    let notice = match state.settings_service.test_connection(&credentials).await {
        Ok(result @ ConnectionTestResult::Success) => Notice::Success(result.message().to_string()),
        Ok(result @ ConnectionTestResult::Failure) => Notice::Failure(result.message().to_string()),
        Err(busy) => Notice::Failure(busy.to_string()),
    };
    Html(views::settings_page(&credentials, Some(&notice)))
}
