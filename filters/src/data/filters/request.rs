//! Filter request decoding
//!
//! A request is an insertion-ordered map of filter name to raw string value.
//! Untrusted input arrives as JSON (or anything serde can turn into a map)
//! and is decoded here; everything that is not a flat name→scalar map is
//! rejected before the engine sees it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::FilterError;
use crate::core::config::FilterLimits;

const NOT_A_MAP: &str = "The filters argument must be a map or null";

/// Caller-supplied filter values, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    entries: Vec<(String, String)>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a filter. A repeated name keeps its first position and takes
    /// the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Decode a JSON value
    ///
    /// `null` is an empty request. Objects become requests, with numbers and
    /// booleans stringified and `null` values left blank. Anything else,
    /// including nested arrays or objects as values, is an `Argument` error.
    pub fn from_json(value: &Value) -> Result<Self, FilterError> {
        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            _ => return Err(FilterError::argument(NOT_A_MAP)),
        };

        let mut request = Self::new();
        for (name, raw) in map {
            let raw = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(FilterError::argument(format!(
                        "Filter {} must have a scalar value",
                        name
                    )));
                }
            };
            request.insert(name.clone(), raw);
        }
        Ok(request)
    }

    /// Parse and decode a JSON document, enforcing the request size limit
    pub fn from_json_str(json: &str, limits: &FilterLimits) -> Result<Self, FilterError> {
        if json.len() > limits.max_request_bytes {
            return Err(FilterError::argument(format!(
                "Filter JSON exceeds maximum size of {} bytes",
                limits.max_request_bytes
            )));
        }
        let value: Value = serde_json::from_str(json)
            .map_err(|e| FilterError::argument(format!("Invalid filter JSON: {}", e)))?;
        Self::from_json(&value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (name, value) in iter {
            request.insert(name, value);
        }
        request
    }
}

impl<'de> Deserialize<'de> for FilterRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
