//! Error reporting for failed predictions. Kept in its own test binary
//! because the collecting logger is process-global.
use client::BatchOrchestrator;
use client::PredictionClient;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use shared::ModelArchitecture;
use std::sync::Mutex;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Keeps every record logged by this crate in memory.
struct CollectingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CollectingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("client")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CollectingLogger = CollectingLogger {
    records: Mutex::new(Vec::new()),
};

#[tokio::test]
async fn test_failed_call_logs_exactly_one_error() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(
            json!({"features": [0], "model_architecture": "decisiontree"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(
            json!({"features": [1], "model_architecture": "decisiontree"}),
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("model exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let dataset_path = dir.path().join("testing_dataset.json");
    std::fs::write(&dataset_path, r#"{"x_test":[{"flag":false},{"flag":true}]}"#).unwrap();

    let endpoint = Url::parse(&format!("{}/predict", server.uri())).unwrap();
    let client = PredictionClient::new(endpoint, ModelArchitecture::DecisionTree);
    let report = BatchOrchestrator::new(client)
        .run_from_path(&dataset_path)
        .await
        .unwrap();

    assert_eq!(report.results, vec![Some("1".to_string()), None]);

    let records = LOGGER.records.lock().unwrap();
    let errors: Vec<&String> = records
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message)
        .collect();
    assert_eq!(errors.len(), 1, "errors logged: {:?}", errors);
    assert!(errors[0].contains("Prediction 1 failed"));
    assert!(errors[0].contains("500"));
    assert!(errors[0].contains("model exploded"));
    assert!(!records
        .iter()
        .any(|(level, message)| *level == Level::Error && message.contains("Prediction 0")));
}
