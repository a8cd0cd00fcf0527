use serde::{Deserialize, Serialize};
use serde_json::Number;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A single feature as it travels to the model server: a plain JSON
/// boolean, number or string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Number(Number::from(value))
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

/// Model selector understood by the `/predict` endpoint.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr,
    EnumIter, IntoStaticStr,
)]
pub enum ModelArchitecture {
    #[default]
    #[serde(rename = "decisiontree")]
    #[strum(serialize = "decisiontree")]
    DecisionTree,
    #[serde(rename = "logistic")]
    #[strum(serialize = "logistic")]
    Logistic,
}

impl ModelArchitecture {
    /// Wire names of every selector, in declaration order.
    pub fn supported() -> Vec<&'static str> {
        ModelArchitecture::iter().map(|arch| arch.into()).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionRequest {
    pub features: Vec<FeatureValue>,
    pub model_architecture: ModelArchitecture,
}
