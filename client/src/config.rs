use shared::ModelArchitecture;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_DATASET_PATH: &str = "data/testing_dataset.json";
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8080/predict";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid endpoint URL {value}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unknown model architecture {value}, expected one of {supported:?}")]
    UnknownArchitecture {
        value: String,
        supported: Vec<&'static str>,
    },
    #[error("Invalid value for {name}: {value}")]
    InvalidFlag { name: &'static str, value: String },
}

/// Process-wide settings, read once at startup and handed to the
/// components by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub dataset_path: PathBuf,
    pub endpoint_url: Url,
    pub model_architecture: ModelArchitecture,
    /// Exit non-zero when any prediction comes back as the failure sentinel.
    pub fail_on_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            endpoint_url: Url::parse(DEFAULT_ENDPOINT_URL).expect("default endpoint URL is valid"),
            model_architecture: ModelArchitecture::default(),
            fail_on_error: false,
        }
    }
}

impl ClientConfig {
    /// Reads `DATASET_PATH`, `PREDICT_ENDPOINT_URL`, `MODEL_ARCHITECTURE` and
    /// `PREDICT_FAIL_ON_ERROR`, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("DATASET_PATH") {
            config.dataset_path = PathBuf::from(path);
        }

        if let Some(value) = lookup("PREDICT_ENDPOINT_URL") {
            config.endpoint_url =
                Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { value, source })?;
        }

        if let Some(value) = lookup("MODEL_ARCHITECTURE") {
            config.model_architecture = ModelArchitecture::from_str(value.trim()).map_err(|_| {
                ConfigError::UnknownArchitecture {
                    value,
                    supported: ModelArchitecture::supported(),
                }
            })?;
        }

        if let Some(value) = lookup("PREDICT_FAIL_ON_ERROR") {
            config.fail_on_error = parse_flag("PREDICT_FAIL_ON_ERROR", value)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}
