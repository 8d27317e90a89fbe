// Outcome types for outbound calls

/// How a metrics fetch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Timeout,
    Generic,
    Unexpected,
}

impl ErrorKind {
    /// User-facing sentence shown in the dashboard alert
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "User not found. Please check your Chatwoot account.",
            ErrorKind::Unauthorized => "Authentication failed. Please check your API token.",
            ErrorKind::Timeout => "Connection timed out. Please try again later.",
            ErrorKind::Generic => "Failed to fetch dashboard data. Please try again.",
            ErrorKind::Unexpected => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Shown when a fetch succeeds but carries no data
pub const MISSING_DATA_MESSAGE: &str =
    "No data available. Please check your Chatwoot connection.";

/// Result of one network attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Ready(T),
    Failed(ErrorKind),
}

impl<T> FetchOutcome<T> {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            FetchOutcome::Ready(_) => None,
            FetchOutcome::Failed(kind) => Some(*kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionTestResult {
    Success,
    Failure,
}

impl ConnectionTestResult {
    pub fn message(self) -> &'static str {
        match self {
            ConnectionTestResult::Success => {
                "Connection successful! WooCommerce API is accessible."
            }
            ConnectionTestResult::Failure => {
                "Connection failed. Please check your settings and ensure the WooCommerce API is enabled."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(
            ErrorKind::Unauthorized.message(),
            "Authentication failed. Please check your API token."
        );
    }

    #[test]
    fn test_messages_are_distinct() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::Unauthorized,
            ErrorKind::Timeout,
            ErrorKind::Generic,
            ErrorKind::Unexpected,
        ];
        let mut messages: Vec<&str> = kinds.iter().map(|k| k.message()).collect();
        messages.push(MISSING_DATA_MESSAGE);
        messages.sort_unstable();
        messages.dedup();

        assert_eq!(messages.len(), 6);
    }

    #[test]
    fn test_fetch_outcome_accessors() {
        let ready: FetchOutcome<u32> = FetchOutcome::Ready(1);
        let failed: FetchOutcome<u32> = FetchOutcome::Failed(ErrorKind::Timeout);

        assert_eq!(ready.error_kind(), None);
        assert_eq!(failed.error_kind(), Some(ErrorKind::Timeout));
    }
}
