//! Whitelisted, type-checked query filters for untrusted input
//!
//! Models declare which attributes (and which custom predicates) callers may
//! filter on. At request time a string-typed [`FilterRequest`] is validated,
//! coerced, and folded onto a [`Queryable`] without touching the caller's
//! starting query.
//!
//! ```no_run
//! use secure_filters::{FieldMap, FilterRegistry, FilterRequest, PrimitiveType, SqlQuery};
//!
//! let fields = FieldMap::new()
//!     .with("first_name", PrimitiveType::String)
//!     .with("age", PrimitiveType::Integer);
//! let registry = FilterRegistry::<SqlQuery>::builder("students", fields)
//!     .attributes(&["first_name", "age"])
//!     .unwrap()
//!     .build();
//!
//! let request = FilterRequest::new().with("first_name", "john");
//! let query = registry
//!     .apply(&SqlQuery::new("students"), Some(&request), &())
//!     .unwrap();
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT students.* FROM students WHERE lower(students.first_name) = ?"
//! );
//! ```

pub mod core;
pub mod data;
pub mod utils;

pub use crate::core::config::{FilterConfig, FilterLimits};
pub use crate::data::filters::{
    DefinitionTable, Definitions, FieldMap, FieldType, FilterError, FilterRegistry,
    FilterRegistryBuilder, FilterRequest, FilterValue, Filterable, NoDefinitions, PrimitiveType,
    Queryable, RawValueExt, apply_filters, convert_value, validate_field_type, validate_value,
};
pub use crate::data::sql::{PostgresDialect, SqlDialect, SqlParams, SqlQuery, SqliteDialect};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
