//! Query filter system
//!
//! Declarative, whitelisted filters for untrusted input. Models declare which
//! attributes and custom predicates are filterable; requests are validated
//! against the declared types and folded onto a [`Queryable`].
//!
//! ## Usage
//!
//! ```no_run
//! use secure_filters::data::filters::{FieldMap, FilterError, FilterRegistry, FilterRequest, FilterValue, PrimitiveType, Queryable};
//! use secure_filters::data::sql::SqlQuery;
//!
//! struct Actor {
//!     admin: bool,
//! }
//!
//! let fields = FieldMap::new().with("gpa", PrimitiveType::Float);
//! let registry = FilterRegistry::<SqlQuery, Option<Actor>>::builder("students", fields)
//!     .attributes(&["gpa"])?
//!     .custom("at_risk", PrimitiveType::Boolean, |q, value, actor: &Option<Actor>| {
//!         if !actor.as_ref().is_some_and(|a| a.admin) {
//!             return Err(FilterError::forbidden("at_risk"));
//!         }
//!         let op = if value.as_bool() == Some(true) { "<" } else { ">=" };
//!         Ok(q.where_raw(&format!("students.gpa {} ?", op), FilterValue::Float(2.5)))
//!     })?
//!     .build();
//!
//! let request = FilterRequest::from_json(&serde_json::json!({"at_risk": "true"}))?;
//! let query = registry.apply(&SqlQuery::new("students"), Some(&request), &Some(Actor { admin: true }))?;
//! # Ok::<(), FilterError>(())
//! ```

mod converter;
mod definitions;
mod engine;
mod error;
mod model;
mod queryable;
mod registry;
mod request;
mod types;
mod validator;

pub use converter::convert_value;
pub use definitions::{DefinitionTable, Definitions, NoDefinitions};
pub use engine::apply_filters;
pub use error::FilterError;
pub use model::Filterable;
pub use queryable::Queryable;
pub use registry::{FilterRegistration, FilterRegistry, FilterRegistryBuilder, Resolver};
pub use request::FilterRequest;
pub use types::{FieldMap, FieldType, FilterValue, PrimitiveType};
pub use validator::{
    FALSE_TOKENS, RawValueExt, TRUE_TOKENS, parse_boolean_token, validate_field_type,
    validate_value,
};
