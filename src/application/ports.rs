// Traits at the infrastructure seams
use crate::domain::credentials::Credentials;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::outcome::{ConnectionTestResult, FetchOutcome};
use async_trait::async_trait;
use thiserror::Error;

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch metrics once. `Ready(None)` means the call succeeded without data.
    async fn fetch(&self, endpoint: &str, token: &str) -> FetchOutcome<Option<DashboardMetrics>>;
}

#[async_trait]
pub trait ConnectionTester: Send + Sync {
    /// Probe the store API. Every failure collapses into `Failure`.
    async fn test(&self, credentials: &Credentials) -> ConnectionTestResult;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable string key-value storage. Batch reads and writes are atomic with
/// respect to each other.
pub trait KeyValueStore: Send + Sync {
    /// One value per key, in order, from a single consistent snapshot
    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>>;

    /// Writes every entry or none of them
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    fn get(&self, key: &str) -> Option<String> {
        self.get_many(&[key]).pop().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key, value)])
    }
}
