pub mod batch;
pub mod config;
pub mod dataset;
pub mod normalize;
pub mod predictor;

pub use batch::{BatchOrchestrator, BatchReport, BatchState};
pub use config::{ClientConfig, ConfigError};
pub use dataset::{Dataset, FeatureRecord, LoadError};
pub use predictor::{PredictionClient, PredictionError};
