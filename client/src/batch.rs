use crate::dataset::{Dataset, FeatureRecord, LoadError};
use crate::normalize::normalize_all;
use crate::predictor::PredictionClient;
use futures::future::join_all;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Loading,
    Normalizing,
    Dispatching(usize),
    Settled,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchState::Idle => write!(f, "idle"),
            BatchState::Loading => write!(f, "loading"),
            BatchState::Normalizing => write!(f, "normalizing"),
            BatchState::Dispatching(n) => write!(f, "dispatching {} requests", n),
            BatchState::Settled => write!(f, "settled"),
        }
    }
}

/// Outcome of one batch. `results[i]` belongs to the i-th input record;
/// `None` marks a call that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub results: Vec<Option<String>>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|result| result.is_some()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// The result list as a JSON array, `null` at failed positions.
    pub fn results_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.results)
    }
}

pub struct BatchOrchestrator {
    client: PredictionClient,
    state: BatchState,
}

impl BatchOrchestrator {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            state: BatchState::Idle,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    fn transition(&mut self, next: BatchState) {
        log::debug!("Batch {} -> {}", self.state, next);
        self.state = next;
    }

    /// Loads the dataset at `path` and runs it. Nothing is sent when the
    /// dataset cannot be loaded.
    pub async fn run_from_path(&mut self, path: impl AsRef<Path>) -> Result<BatchReport, LoadError> {
        self.transition(BatchState::Loading);
        let dataset = match Dataset::load(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                self.transition(BatchState::Idle);
                return Err(e);
            }
        };
        Ok(self.run(dataset.x_test).await)
    }

    /// Normalizes every record and sends them all at once. Completes when
    /// every request has either answered or failed.
    pub async fn run(&mut self, records: Vec<FeatureRecord>) -> BatchReport {
        self.transition(BatchState::Normalizing);
        let records = normalize_all(records);

        self.transition(BatchState::Dispatching(records.len()));
        let client = &self.client;
        let start = Instant::now();
        let results = join_all(
            records
                .iter()
                .enumerate()
                .map(|(index, record)| client.predict(index, record)),
        )
        .await;
        let elapsed = start.elapsed();
        self.transition(BatchState::Settled);

        let report = BatchReport { results, elapsed };
        log::info!(
            "Batch settled: {} succeeded, {} failed in {:.3}s",
            report.success_count(),
            report.failure_count(),
            report.elapsed_secs()
        );
        report
    }
}
