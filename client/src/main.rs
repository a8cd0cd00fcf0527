use client::{BatchOrchestrator, ClientConfig, PredictionClient};
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::debug!("Current working directory: {}", current_dir.display());
    }

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let predictor = PredictionClient::from_config(&config);
    log::info!(
        "Sending {} to {} using {}",
        config.dataset_path.display(),
        predictor.endpoint(),
        predictor.architecture()
    );

    let mut orchestrator = BatchOrchestrator::new(predictor);
    let report = match orchestrator.run_from_path(&config.dataset_path).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match report.results_json() {
        Ok(results) => println!("{}", results),
        Err(e) => log::error!("Failed to render results: {}", e),
    }
    println!(
        "total time taken to make predictions are: {} seconds",
        report.elapsed_secs()
    );

    if config.fail_on_error && !report.is_complete_success() {
        log::warn!("{} of {} predictions failed", report.failure_count(), report.results.len());
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
