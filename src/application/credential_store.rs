// Credential store - Store API settings on top of a key-value store
use crate::application::ports::{KeyValueStore, StorageError};
use crate::domain::credentials::Credentials;
use std::sync::Arc;

pub const URL_KEY: &str = "woocommerce_url";
pub const CONSUMER_KEY_KEY: &str = "woocommerce_consumer_key";
pub const CONSUMER_SECRET_KEY: &str = "woocommerce_consumer_secret";

#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Never fails; absent entries come back as empty strings
    pub fn load(&self) -> Credentials {
        let mut values = self
            .store
            .get_many(&[URL_KEY, CONSUMER_KEY_KEY, CONSUMER_SECRET_KEY])
            .into_iter()
            .map(Option::unwrap_or_default);
        let mut next = || values.next().unwrap_or_default();
        Credentials::new(next(), next(), next())
    }

    /// Writes all three entries in one batch, so a concurrent `load` sees
    /// either the old triple or the new one
    pub fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        self.store.set_many(&[
            (URL_KEY, credentials.endpoint_url.as_str()),
            (CONSUMER_KEY_KEY, credentials.consumer_key.as_str()),
            (CONSUMER_SECRET_KEY, credentials.consumer_secret.as_str()),
        ])?;
        tracing::info!("Saved store credentials for {}", credentials.endpoint_url);
        Ok(())
    }
}
