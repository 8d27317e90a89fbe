// Settings service - Credential editing and connection testing
use crate::application::credential_store::CredentialStore;
use crate::application::ports::{ConnectionTester, StorageError};
use crate::domain::credentials::Credentials;
use crate::domain::outcome::ConnectionTestResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub const SAVED_MESSAGE: &str = "WooCommerce settings saved successfully!";

#[derive(Debug, Error)]
#[error("failed to save settings: {0}")]
pub struct SaveError(#[from] StorageError);

/// Another connection test has not finished yet
#[derive(Debug, Error)]
#[error("A connection test is already running.")]
pub struct TestInProgress;

#[derive(Clone)]
pub struct SettingsService {
    credentials: CredentialStore,
    tester: Arc<dyn ConnectionTester>,
    testing: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the test finishes, however it finishes
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SettingsService {
    pub fn new(credentials: CredentialStore, tester: Arc<dyn ConnectionTester>) -> Self {
        Self {
            credentials,
            tester,
            testing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn hydrate(&self) -> Credentials {
        self.credentials.load()
    }

    pub fn save(&self, credentials: &Credentials) -> Result<(), SaveError> {
        self.credentials.save(credentials)?;
        Ok(())
    }

    /// Test the given (possibly unsaved) credentials. Only one test runs at
    /// a time.
    pub async fn test_connection(
        &self,
        credentials: &Credentials,
    ) -> Result<ConnectionTestResult, TestInProgress> {
        if self
            .testing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejecting connection test: another test is in flight");
            return Err(TestInProgress);
        }
        let _guard = InFlight(self.testing.clone());

        let result = self.tester.test(credentials).await;
        tracing::info!(
            "Connection test against {} finished: {:?}",
            credentials.endpoint_url,
            result
        );
        Ok(result)
    }
}
