// Domain layer - Plain data and state transitions
pub mod credentials;
pub mod metrics;
pub mod outcome;
pub mod view_state;
