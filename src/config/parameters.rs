use crate::domain::ports::{strip_namespace, ParameterStore};
use crate::utils::error::MotionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter table held in memory, keyed without the `user/` namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct InMemoryParameters {
    values: HashMap<String, f64>,
}

impl InMemoryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key.as_ref(), value);
        }
        params
    }

    pub fn insert(&mut self, key: &str, value: f64) -> Option<f64> {
        self.values.insert(strip_namespace(key).to_string(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Rejects tables that spell one parameter both with and without `user/`.
impl TryFrom<HashMap<String, f64>> for InMemoryParameters {
    type Error = MotionError;

    fn try_from(values: HashMap<String, f64>) -> Result<Self, Self::Error> {
        let mut params = Self::new();
        for (key, value) in values {
            if params.insert(&key, value).is_some() {
                return Err(MotionError::ConfigValidationError {
                    field: format!("parameters.{}", strip_namespace(&key)),
                    message: format!(
                        "'{}' is given both with and without the user/ prefix",
                        strip_namespace(&key)
                    ),
                });
            }
        }
        Ok(params)
    }
}

impl From<InMemoryParameters> for HashMap<String, f64> {
    fn from(params: InMemoryParameters) -> Self {
        params.values
    }
}

impl ParameterStore for InMemoryParameters {
    fn get_real(&self, key: &str) -> Option<f64> {
        self.values.get(strip_namespace(key)).copied()
    }
}
