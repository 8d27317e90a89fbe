use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "SUPPORTDESK";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub helpdesk: HelpdeskSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Deserialize, Clone)]
pub struct HelpdeskSettings {
    pub endpoint: String,
    pub api_token: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HelpdeskSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Debug for HelpdeskSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpdeskSettings")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Settings file; empty keeps settings in memory only
    pub path: String,
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("helpdesk.endpoint", "https://app.chatwoot.com/api/v1/dashboard")?
        .set_default("helpdesk.api_token", "")?
        .set_default("storage.path", "data/settings.json")
}

/// Defaults, then `config/app.*` if present, then `SUPPORTDESK__*` env vars
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = defaults()?
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        defaults()
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.helpdesk.endpoint, "https://app.chatwoot.com/api/v1/dashboard");
        assert_eq!(config.helpdesk.api_token, "");
        assert_eq!(config.helpdesk.timeout(), None);
        assert_eq!(config.storage.path, "data/settings.json");
    }

    #[test]
    fn test_file_overrides() {
        let config = parse(
            r#"
            [helpdesk]
            api_token = "secret-token"
            timeout_secs = 5

            [storage]
            path = ""
            "#,
        );

        assert_eq!(config.helpdesk.api_token, "secret-token");
        assert_eq!(config.helpdesk.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.storage.path, "");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = parse("[helpdesk]\napi_token = \"secret-token\"");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
