// Store API credentials domain model

/// Endpoint and key pair for the store API. Fields are independent; any of
/// them may be empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl Credentials {
    pub fn new(endpoint_url: String, consumer_key: String, consumer_secret: String) -> Self {
        Self {
            endpoint_url,
            consumer_key,
            consumer_secret,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint_url", &self.endpoint_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new(
            "https://shop.example".to_string(),
            "k1".to_string(),
            "s1".to_string(),
        );
        let printed = format!("{:?}", creds);

        assert!(printed.contains("k1"));
        assert!(!printed.contains("s1"));
    }
}
