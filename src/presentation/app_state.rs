// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::settings_service::SettingsService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
}
