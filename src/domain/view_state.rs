// View state machine shared by the dashboard and its JSON mirror
use super::metrics::DashboardMetrics;
use super::outcome::{FetchOutcome, MISSING_DATA_MESSAGE};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Presentation mode of a view. `Loading` is initial; `Ready` and `Error` are
/// terminal until a new cycle starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewState<T> {
    Loading,
    Ready {
        data: T,
        fetched_at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Reduce a fetch outcome to a terminal state. Absent data never yields
    /// an empty `Ready`.
    pub fn settle(outcome: FetchOutcome<Option<T>>, fetched_at: DateTime<Utc>) -> Self {
        match outcome {
            FetchOutcome::Ready(Some(data)) => ViewState::Ready { data, fetched_at },
            FetchOutcome::Ready(None) => ViewState::Error {
                message: MISSING_DATA_MESSAGE.to_string(),
            },
            FetchOutcome::Failed(kind) => ViewState::Error {
                message: kind.message().to_string(),
            },
        }
    }
}

/// Dashboard view: the current state plus the generation of the cycle that
/// owns it.
#[derive(Debug, Clone)]
pub struct DashboardView {
    state: ViewState<DashboardMetrics>,
    generation: u64,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState<DashboardMetrics> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new fetch cycle, resetting to `Loading`
    pub fn begin_cycle(&mut self) -> u64 {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.generation
    }

    /// Apply the outcome of cycle `generation`. Returns false and leaves the
    /// state untouched when that cycle has been superseded or already settled.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: FetchOutcome<Option<DashboardMetrics>>,
        fetched_at: DateTime<Utc>,
    ) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            return false;
        }
        self.state = ViewState::settle(outcome, fetched_at);
        true
    }
}
