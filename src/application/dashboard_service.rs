// Dashboard service - Fetch cycles and the reducer that owns the view
use crate::application::ports::MetricsSource;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::outcome::FetchOutcome;
use crate::domain::view_state::{DashboardView, ViewState};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Outcome of one cycle, delivered to the reducer
#[derive(Debug)]
pub struct CycleSettled {
    pub generation: u64,
    pub outcome: FetchOutcome<Option<DashboardMetrics>>,
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn MetricsSource>,
    endpoint: String,
    token: String,
    view: Arc<RwLock<DashboardView>>,
    tx: mpsc::Sender<CycleSettled>,
}

impl DashboardService {
    /// Create the service and spawn its reducer task. Must be called from
    /// within a tokio runtime.
    pub fn spawn(source: Arc<dyn MetricsSource>, endpoint: String, token: String) -> Self {
        let view = Arc::new(RwLock::new(DashboardView::new()));
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(run_reducer(view.clone(), rx));

        Self {
            source,
            endpoint,
            token,
            view,
            tx,
        }
    }

    /// Begin a new fetch cycle. The view is `Loading` when this returns.
    pub async fn refresh(&self) -> u64 {
        let generation = self.view.write().await.begin_cycle();
        tracing::info!("Dashboard fetch cycle {} started", generation);

        let source = self.source.clone();
        let endpoint = self.endpoint.clone();
        let token = self.token.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = source.fetch(&endpoint, &token).await;
            if tx.send(CycleSettled { generation, outcome }).await.is_err() {
                tracing::warn!("Dashboard reducer stopped before cycle {} settled", generation);
            }
        });

        generation
    }

    pub async fn snapshot(&self) -> ViewState<DashboardMetrics> {
        self.view.read().await.state().clone()
    }
}

/// Sole writer of settled outcomes. Runs until every sender is dropped.
pub async fn run_reducer(view: Arc<RwLock<DashboardView>>, mut rx: mpsc::Receiver<CycleSettled>) {
    while let Some(CycleSettled { generation, outcome }) = rx.recv().await {
        let failure = outcome.error_kind();
        let mut current = view.write().await;

        if current.apply(generation, outcome, Utc::now()) {
            match failure {
                Some(kind) => tracing::warn!("Dashboard cycle {} failed: {:?}", generation, kind),
                None => tracing::info!("Dashboard cycle {} settled", generation),
            }
        } else {
            tracing::debug!(
                "Discarding stale outcome for cycle {} (current {})",
                generation,
                current.generation()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::ErrorKind;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedSource {
        outcome: FetchOutcome<Option<DashboardMetrics>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl MetricsSource for FixedSource {
        async fn fetch(&self, endpoint: &str, token: &str) -> FetchOutcome<Option<DashboardMetrics>> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), token.to_string()));
            self.outcome.clone()
        }
    }

    fn sample() -> DashboardMetrics {
        DashboardMetrics::new(42, 7, "93%".to_string())
    }

    async fn wait_settled(service: &DashboardService) -> ViewState<DashboardMetrics> {
        for _ in 0..100 {
            let state = service.snapshot().await;
            if !state.is_loading() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("dashboard never settled");
    }

    #[tokio::test]
    async fn test_refresh_settles_ready() {
        let source = Arc::new(FixedSource {
            outcome: FetchOutcome::Ready(Some(sample())),
            calls: Mutex::new(Vec::new()),
        });
        let service = DashboardService::spawn(
            source.clone(),
            "https://desk.example/api".to_string(),
            "token-1".to_string(),
        );

        assert!(service.snapshot().await.is_loading());
        service.refresh().await;

        match wait_settled(&service).await {
            ViewState::Ready { data, .. } => assert_eq!(data, sample()),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(
            source.calls.lock().unwrap().as_slice(),
            &[("https://desk.example/api".to_string(), "token-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_refresh_settles_error() {
        let source = Arc::new(FixedSource {
            outcome: FetchOutcome::Failed(ErrorKind::Unauthorized),
            calls: Mutex::new(Vec::new()),
        });
        let service = DashboardService::spawn(source, String::new(), String::new());
        service.refresh().await;

        assert_eq!(
            wait_settled(&service).await,
            ViewState::Error {
                message: "Authentication failed. Please check your API token.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_reducer_discards_stale_cycle() {
        let view = Arc::new(RwLock::new(DashboardView::new()));
        let first = view.write().await.begin_cycle();
        let second = view.write().await.begin_cycle();

        let (tx, rx) = mpsc::channel(4);
        tx.send(CycleSettled {
            generation: second,
            outcome: FetchOutcome::Failed(ErrorKind::Timeout),
        })
        .await
        .unwrap();
        tx.send(CycleSettled {
            generation: first,
            outcome: FetchOutcome::Ready(Some(sample())),
        })
        .await
        .unwrap();
        drop(tx);

        run_reducer(view.clone(), rx).await;

        assert_eq!(
            view.read().await.state(),
            &ViewState::Error {
                message: ErrorKind::Timeout.message().to_string()
            }
        );
    }
}
