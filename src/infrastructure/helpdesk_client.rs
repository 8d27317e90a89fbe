// Helpdesk metrics client (Chatwoot-compatible)
use crate::application::ports::MetricsSource;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::outcome::{ErrorKind, FetchOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::time::Duration;

pub const TOKEN_HEADER: &str = "api-access-token";

#[derive(Debug, Clone)]
pub struct HelpdeskClient {
    client: reqwest::Client,
}

impl HelpdeskClient {
    /// Without a timeout the transport default applies
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build helpdesk HTTP client")?;
        Ok(Self { client })
    }
}

/// Map a non-success HTTP status to an error kind
pub fn classify_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        _ => ErrorKind::Generic,
    }
}

/// Map a transport error to an error kind. A status carried by the error
/// takes precedence over its timeout/connect flags.
pub fn classify_transport(err: &reqwest::Error) -> ErrorKind {
    if let Some(status) = err.status() {
        return classify_status(status);
    }
    if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() || err.is_decode() || err.is_body() || err.is_builder() {
        ErrorKind::Unexpected
    } else {
        ErrorKind::Generic
    }
}

/// Decode a success body. Empty and `null` bodies carry no data; anything
/// that is not a complete metrics object is unexpected.
pub fn parse_metrics(body: &str) -> FetchOutcome<Option<DashboardMetrics>> {
    if body.trim().is_empty() {
        return FetchOutcome::Ready(None);
    }
    match serde_json::from_str::<Option<DashboardMetrics>>(body) {
        Ok(metrics) => FetchOutcome::Ready(metrics),
        Err(e) => {
            tracing::warn!("Malformed helpdesk response: {}", e);
            FetchOutcome::Failed(ErrorKind::Unexpected)
        }
    }
}

#[async_trait]
impl MetricsSource for HelpdeskClient {
    async fn fetch(&self, endpoint: &str, token: &str) -> FetchOutcome<Option<DashboardMetrics>> {
        tracing::debug!("Fetching helpdesk metrics from {}", endpoint);

        let response = match self
            .client
            .get(endpoint)
            .header(TOKEN_HEADER, token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let kind = classify_transport(&e);
                tracing::warn!("Helpdesk request failed ({:?}): {}", kind, e);
                return FetchOutcome::Failed(kind);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let kind = classify_status(status);
            tracing::warn!("Helpdesk responded with status {} ({:?})", status, kind);
            return FetchOutcome::Failed(kind);
        }

        match response.text().await {
            Ok(body) => parse_metrics(&body),
            Err(e) => {
                let kind = classify_transport(&e);
                tracing::warn!("Failed to read helpdesk response body ({:?}): {}", kind, e);
                FetchOutcome::Failed(kind)
            }
        }
    }
}
