//! Filter type definitions
//!
//! Defines the declared filter types, the typed values produced from raw
//! input, and the field map handed over by schema introspection.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Primitive column types that can back an attribute filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Bigint,
    Boolean,
    Decimal,
    Integer,
    Float,
    String,
    Text,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 7] = [
        Self::Bigint,
        Self::Boolean,
        Self::Decimal,
        Self::Integer,
        Self::Float,
        Self::String,
        Self::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bigint => "bigint",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Text => "text",
        }
    }

    /// Parse a type name (exact, lowercase)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// String and text compare case-insensitively
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Text)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type attached to a declared filter
///
/// Either a primitive or the name of a custom type resolved through a
/// [`Definitions`](super::Definitions) provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Custom(String),
}

impl FieldType {
    /// Primitive names map to primitives, anything else is a custom type
    pub fn from_name(name: &str) -> Self {
        match PrimitiveType::parse(name) {
            Some(primitive) => Self::Primitive(primitive),
            None => Self::Custom(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Primitive(primitive) => primitive.as_str(),
            Self::Custom(name) => name,
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Primitive(PrimitiveType::String)
    }
}

impl From<PrimitiveType> for FieldType {
    fn from(primitive: PrimitiveType) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Native value produced from a validated raw value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl FilterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Filterable fields of a model, keyed by column name
///
/// Only columns with a supported primitive type belong here; introspection
/// drops everything else, so declaring a filter on such a column fails.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: FxHashMap<String, PrimitiveType>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, primitive: PrimitiveType) -> Self {
        self.insert(name, primitive);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, primitive: PrimitiveType) {
        self.fields.insert(name.into(), primitive);
    }

    pub fn get(&self, name: &str) -> Option<PrimitiveType> {
        self.fields.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, PrimitiveType)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, PrimitiveType)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, primitive) in iter {
            fields.insert(name, primitive);
        }
        fields
    }
}
