//! Custom type definitions
//!
//! Validators for domain-specific value types beyond the primitives. A
//! filter declared with a non-primitive type name is validated by whatever
//! provider the registry was built with.

use std::fmt;

use rustc_hash::FxHashMap;

/// Provider of named custom value types
pub trait Definitions: Send + Sync {
    /// Whether a custom type with this name exists
    fn has_custom_type(&self, name: &str) -> bool;

    /// Run the named check against a raw value. Unknown names never pass.
    fn invoke_custom_type(&self, name: &str, raw: &str) -> bool;
}

/// Provider with no custom types
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefinitions;

impl Definitions for NoDefinitions {
    fn has_custom_type(&self, _name: &str) -> bool {
        false
    }

    fn invoke_custom_type(&self, _name: &str, _raw: &str) -> bool {
        false
    }
}

type Check = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Custom types backed by named closures
#[derive(Default)]
pub struct DefinitionTable {
    checks: FxHashMap<String, Check>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a custom type
    pub fn with<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.define(name, check);
        self
    }

    pub fn define<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.checks.insert(name.into(), Box::new(check));
    }
}

impl Definitions for DefinitionTable {
    fn has_custom_type(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    fn invoke_custom_type(&self, name: &str, raw: &str) -> bool {
        self.checks.get(name).is_some_and(|check| check(raw))
    }
}

impl fmt::Debug for DefinitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DefinitionTable")
            .field("types", &names)
            .finish()
    }
}
