//! Per-model filter surface
//!
//! A model owns one registry, typically in a `LazyLock` built at startup,
//! and a starting query covering all of its records.

use super::error::FilterError;
use super::queryable::Queryable;
use super::registry::FilterRegistry;
use super::request::FilterRequest;

pub trait Filterable {
    type Query: Queryable + 'static;
    type Context: 'static;

    /// Query over every record of the model
    fn all() -> Self::Query;

    /// The model's declared filters
    fn filter_registry() -> &'static FilterRegistry<Self::Query, Self::Context>;

    /// Apply a request starting from [`all`](Self::all)
    fn apply_filters(
        request: Option<&FilterRequest>,
        context: &Self::Context,
    ) -> Result<Self::Query, FilterError> {
        Self::filter_registry().apply(&Self::all(), request, context)
    }
}
