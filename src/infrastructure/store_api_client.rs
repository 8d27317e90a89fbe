// Store API connection tester (WooCommerce-compatible)
use crate::application::ports::ConnectionTester;
use crate::domain::credentials::Credentials;
use crate::domain::outcome::ConnectionTestResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{redirect, StatusCode};

pub const SYSTEM_STATUS_PATH: &str = "/wp-json/wc/v3/system_status";

#[derive(Debug, Clone)]
pub struct StoreApiClient {
    client: reqwest::Client,
}

impl StoreApiClient {
    pub fn new() -> Result<Self> {
        // 3xx must be observed as a failure, not followed
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to build store API HTTP client")?;
        Ok(Self { client })
    }
}

pub fn system_status_url(endpoint_url: &str) -> String {
    format!("{}{}", endpoint_url.trim_end_matches('/'), SYSTEM_STATUS_PATH)
}

#[async_trait]
impl ConnectionTester for StoreApiClient {
    async fn test(&self, credentials: &Credentials) -> ConnectionTestResult {
        let url = system_status_url(&credentials.endpoint_url);
        tracing::debug!("Testing store API connection at {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&credentials.consumer_key, Some(&credentials.consumer_secret))
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => ConnectionTestResult::Success,
            Ok(response) => {
                tracing::warn!("Store API responded with status {}", response.status());
                ConnectionTestResult::Failure
            }
            Err(e) => {
                tracing::warn!("Store API request failed: {}", e);
                ConnectionTestResult::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(endpoint_url: String) -> Credentials {
        Credentials::new(endpoint_url, "k1".to_string(), "s1".to_string())
    }

    async fn respond_with(status: u16) -> ConnectionTestResult {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SYSTEM_STATUS_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        StoreApiClient::new()
            .unwrap()
            .test(&credentials(server.uri()))
            .await
    }

    #[test]
    fn test_system_status_url() {
        assert_eq!(
            system_status_url("https://shop.example/"),
            "https://shop.example/wp-json/wc/v3/system_status"
        );
        assert_eq!(
            system_status_url("https://shop.example"),
            "https://shop.example/wp-json/wc/v3/system_status"
        );
    }

    #[tokio::test]
    async fn test_200_with_basic_auth_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SYSTEM_STATUS_PATH))
            // base64("k1:s1")
            .and(header("Authorization", "Basic azE6czE="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let result = StoreApiClient::new()
            .unwrap()
            .test(&credentials(format!("{}/", server.uri())))
            .await;
        assert_eq!(result, ConnectionTestResult::Success);
    }

    #[tokio::test]
    async fn test_non_200_statuses_fail() {
        for status in [201, 204, 301, 302, 401, 404, 500, 503] {
            assert_eq!(
                respond_with(status).await,
                ConnectionTestResult::Failure,
                "status {}",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_transport_errors_fail() {
        let client = StoreApiClient::new().unwrap();

        let unreachable = client
            .test(&credentials("http://127.0.0.1:1".to_string()))
            .await;
        assert_eq!(unreachable, ConnectionTestResult::Failure);

        let empty = client.test(&Credentials::default()).await;
        assert_eq!(empty, ConnectionTestResult::Failure);
    }
}
