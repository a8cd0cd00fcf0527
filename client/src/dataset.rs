use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use shared::FeatureValue;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Dataset has no `x_test` key")]
    MissingTestSet,
}

/// One row of model input. Fields keep the order they had in the source
/// document, since the server reads features positionally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRecord {
    fields: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. An existing field is overwritten where it
    /// stands; a new field goes to the end.
    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut FeatureValue> {
        self.fields.iter_mut().map(|(_, value)| value)
    }

    pub fn values(&self) -> impl Iterator<Item = &FeatureValue> {
        self.fields.iter().map(|(_, value)| value)
    }
}

impl<K: Into<String>> FromIterator<(K, FeatureValue)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (K, FeatureValue)>>(iter: I) -> Self {
        let mut record = FeatureRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

struct FeatureRecordVisitor;

impl<'de> Visitor<'de> for FeatureRecordVisitor {
    type Value = FeatureRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of boolean, number or string fields")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let capacity = access.size_hint().unwrap_or(0);
        let mut fields: Vec<(String, FeatureValue)> = Vec::with_capacity(capacity);
        // Position of each name in `fields`, so repeated keys stay O(1).
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);
        while let Some((name, value)) = access.next_entry::<String, FeatureValue>()? {
            match positions.get(&name) {
                Some(&index) => fields[index].1 = value,
                None => {
                    positions.insert(name.clone(), fields.len());
                    fields.push((name, value));
                }
            }
        }
        Ok(FeatureRecord { fields })
    }
}

impl<'de> Deserialize<'de> for FeatureRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FeatureRecordVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    x_test: Option<Vec<FeatureRecord>>,
}

/// The test split written by the training script. Anything besides
/// `x_test` (labels, metadata) is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x_test: Vec<FeatureRecord>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded {} test records from {}",
            dataset.x_test.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, LoadError> {
        let raw: RawDataset = serde_json::from_str(contents)?;
        let x_test = raw.x_test.ok_or(LoadError::MissingTestSet)?;
        Ok(Self { x_test })
    }

    pub fn len(&self) -> usize {
        self.x_test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_test.is_empty()
    }
}
