//! Filter registry
//!
//! Per-model table of filter name → resolver, built once at startup and
//! read-only afterwards. Declarations go through [`FilterRegistryBuilder`]:
//!
//! - `attributes` exposes model columns with type-checked equality
//! - `custom` exposes a named predicate builder, optionally guarded by the
//!   request context
//!
//! Re-declaring a name replaces the earlier entry, across both kinds.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::converter::convert_value;
use super::definitions::{Definitions, NoDefinitions};
use super::error::FilterError;
use super::queryable::Queryable;
use super::types::{FieldMap, FieldType, FilterValue, PrimitiveType};
use super::validator::{validate_field_type, validate_value};
use crate::core::config::FilterLimits;

/// Validates a raw value and folds its predicate onto the query
pub type Resolver<Q, C> = Box<dyn Fn(&Q, &str, &C) -> Result<Q, FilterError> + Send + Sync>;

/// One declared filter
pub struct FilterRegistration<Q, C> {
    field_type: FieldType,
    resolver: Resolver<Q, C>,
}

impl<Q, C> FilterRegistration<Q, C> {
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn resolve(&self, query: &Q, raw: &str, context: &C) -> Result<Q, FilterError> {
        (self.resolver)(query, raw, context)
    }
}

impl<Q, C> fmt::Debug for FilterRegistration<Q, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistration")
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

/// Immutable filter table for one model
pub struct FilterRegistry<Q, C = ()> {
    model: String,
    filters: FxHashMap<String, FilterRegistration<Q, C>>,
    limits: FilterLimits,
}

impl<Q: Queryable + 'static, C: 'static> FilterRegistry<Q, C> {
    pub fn builder(model: impl Into<String>, fields: FieldMap) -> FilterRegistryBuilder<Q, C> {
        FilterRegistryBuilder {
            model: model.into(),
            fields,
            definitions: Arc::new(NoDefinitions),
            filters: FxHashMap::default(),
            limits: FilterLimits::default(),
        }
    }
}

impl<Q, C> FilterRegistry<Q, C> {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn limits(&self) -> &FilterLimits {
        &self.limits
    }

    pub fn resolver_for(&self, name: &str) -> Option<&FilterRegistration<Q, C>> {
        self.filters.get(name)
    }

    pub fn field_type(&self, name: &str) -> Option<&FieldType> {
        self.filters.get(name).map(FilterRegistration::field_type)
    }

    /// Declared filter names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<Q, C> fmt::Debug for FilterRegistry<Q, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("model", &self.model)
            .field("filters", &self.names())
            .field("limits", &self.limits)
            .finish()
    }
}

/// Collects filter declarations for one model
pub struct FilterRegistryBuilder<Q, C = ()> {
    model: String,
    fields: FieldMap,
    definitions: Arc<dyn Definitions>,
    filters: FxHashMap<String, FilterRegistration<Q, C>>,
    limits: FilterLimits,
}

impl<Q, C> fmt::Debug for FilterRegistryBuilder<Q, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FilterRegistryBuilder")
            .field("model", &self.model)
            .field("filters", &names)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl<Q: Queryable + 'static, C: 'static> FilterRegistryBuilder<Q, C> {
    /// Provider for custom value types
    pub fn definitions(mut self, definitions: impl Definitions + 'static) -> Self {
        self.definitions = Arc::new(definitions);
        self
    }

    pub fn limits(mut self, limits: FilterLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Expose model columns as equality filters
    ///
    /// Every name must be a known field with a supported primitive type.
    /// String and text columns match case-insensitively, everything else
    /// matches the converted value exactly.
    pub fn attributes(mut self, names: &[&str]) -> Result<Self, FilterError> {
        for &name in names {
            let primitive = self.fields.get(name).ok_or_else(|| {
                FilterError::argument(format!(
                    "\"{}\" is not a valid attribute filter. It must have a datatype of bigint, \
                     boolean, decimal, integer, float, string or text. A custom filter may be \
                     helpful.",
                    name
                ))
            })?;
            let resolver = attribute_resolver::<Q, C>(name.to_string(), primitive);
            self.install(name, FieldType::Primitive(primitive), resolver);
        }
        Ok(self)
    }

    /// Expose a named predicate builder
    ///
    /// The raw value is validated against `field_type`, converted, then
    /// handed to `builder` together with the current query and the request
    /// context. Errors returned by `builder` reach the caller unchanged.
    pub fn custom<F>(
        mut self,
        name: &str,
        field_type: impl Into<FieldType>,
        builder: F,
    ) -> Result<Self, FilterError>
    where
        F: Fn(&Q, FilterValue, &C) -> Result<Q, FilterError> + Send + Sync + 'static,
    {
        let field_type = field_type.into();
        validate_field_type(&field_type, self.definitions.as_ref())?;

        let definitions = Arc::clone(&self.definitions);
        let value_type = field_type.clone();
        let resolver: Resolver<Q, C> = Box::new(
            move |query: &Q, raw: &str, context: &C| -> Result<Q, FilterError> {
                validate_value(&value_type, raw, definitions.as_ref())?;
                let value = convert_value(&value_type, raw)?;
                builder(query, value, context)
            },
        );
        self.install(name, field_type, resolver);
        Ok(self)
    }

    /// [`custom`](Self::custom) with the default `string` type
    pub fn custom_string<F>(self, name: &str, builder: F) -> Result<Self, FilterError>
    where
        F: Fn(&Q, FilterValue, &C) -> Result<Q, FilterError> + Send + Sync + 'static,
    {
        self.custom(name, FieldType::default(), builder)
    }

    pub fn build(self) -> FilterRegistry<Q, C> {
        tracing::debug!(
            model = %self.model,
            filters = self.filters.len(),
            "Filter registry built"
        );
        FilterRegistry {
            model: self.model,
            filters: self.filters,
            limits: self.limits,
        }
    }

    fn install(&mut self, name: &str, field_type: FieldType, resolver: Resolver<Q, C>) {
        tracing::debug!(
            model = %self.model,
            filter = %name,
            field_type = %field_type,
            "Filter declared"
        );
        let replaced = self.filters.insert(
            name.to_string(),
            FilterRegistration {
                field_type,
                resolver,
            },
        );
        if replaced.is_some() {
            tracing::debug!(model = %self.model, filter = %name, "Filter redefined");
        }
    }
}

fn attribute_resolver<Q: Queryable + 'static, C: 'static>(
    column: String,
    primitive: PrimitiveType,
) -> Resolver<Q, C> {
    let field_type = FieldType::Primitive(primitive);
    Box::new(
        move |query: &Q, raw: &str, _context: &C| -> Result<Q, FilterError> {
            validate_value(&field_type, raw, &NoDefinitions)?;
            if primitive.is_textual() {
                Ok(query.where_equals_ignore_case(&column, raw))
            } else {
                let value = convert_value(&field_type, raw)?;
                Ok(query.where_equals(&column, &value))
            }
        },
    )
}
