use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EstimatorError;


/// Per-call options
///
/// An open, string-keyed map forwarded verbatim by the dispatch layer to the
/// concrete estimator or predictor. The recognized keys are model-specific,
/// e.g. an iteration count or a convergence tolerance.
///
/// ```
/// use bayesreg::Options;
///
/// let options = Options::new().with("max_iterations", 50).with("tolerance", 1e-4);
/// assert_eq!(options.get_usize("max_iterations").unwrap(), Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    /// Creates an empty set of options.
    pub fn new() -> Self {
        Options(Map::new())
    }

    /// Builder-style insertion.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reads a non-negative integer option. Returns `Ok(None)` when the key is
    /// absent.
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>, EstimatorError> {
        Ok(self.get_u64(key)?.map(|value| value as usize))
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, EstimatorError> {
        self.typed(key, "a non-negative integer", Value::as_u64)
    }

    /// Reads a numeric option. Integers are accepted and converted.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, EstimatorError> {
        self.typed(key, "a number", Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, EstimatorError> {
        self.typed(key, "a boolean", Value::as_bool)
    }

    fn typed<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Option<T>, EstimatorError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => convert(value)
                .map(Some)
                .ok_or_else(|| EstimatorError::InvalidOption {
                    key: key.to_string(),
                    expected,
                }),
        }
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Options(map)
    }
}

impl From<Options> for Map<String, Value> {
    fn from(options: Options) -> Self {
        options.0
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Options(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
