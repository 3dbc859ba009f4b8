//! Filter resolution
//!
//! Folds a request onto a query, one filter at a time, in request order.
//! Each resolver receives the query produced by the previous one, so a
//! filter may rely on a join introduced earlier in the same request. The
//! caller's query is never modified.

use super::error::FilterError;
use super::queryable::Queryable;
use super::registry::FilterRegistry;
use super::request::FilterRequest;

impl<Q: Queryable, C> FilterRegistry<Q, C> {
    /// Apply a request to `query`
    ///
    /// An absent or empty request returns `query.where_all()`. Otherwise
    /// every entry must have a non-blank value and a registered filter.
    /// The first failure is returned as is.
    pub fn apply(
        &self,
        query: &Q,
        request: Option<&FilterRequest>,
        context: &C,
    ) -> Result<Q, FilterError> {
        let Some(request) = request.filter(|r| !r.is_empty()) else {
            return Ok(query.where_all());
        };

        self.fold(query, request, context).inspect_err(|e| {
            tracing::debug!(
                model = %self.model(),
                code = e.code(),
                error = %e,
                "Filter request rejected"
            );
        })
    }

    fn fold(&self, query: &Q, request: &FilterRequest, context: &C) -> Result<Q, FilterError> {
        let limits = self.limits();
        if request.len() > limits.max_filters {
            return Err(FilterError::TooManyFilters {
                max: limits.max_filters,
            });
        }

        let mut results = query.where_all();
        for (name, raw) in request.iter() {
            if raw.trim().is_empty() {
                return Err(FilterError::BlankValue(name.to_string()));
            }
            if raw.len() > limits.max_value_length {
                return Err(FilterError::ValueTooLong {
                    filter: name.to_string(),
                    max: limits.max_value_length,
                });
            }

            let registration = self
                .resolver_for(name)
                .ok_or_else(|| FilterError::InvalidFilter(name.to_string()))?;
            results = registration.resolve(&results, raw, context)?;
            tracing::trace!(model = %self.model(), filter = %name, "Filter applied");
        }
        Ok(results)
    }
}

/// Free-function form of [`FilterRegistry::apply`]
pub fn apply_filters<Q: Queryable, C>(
    registry: &FilterRegistry<Q, C>,
    query: &Q,
    request: Option<&FilterRequest>,
    context: &C,
) -> Result<Q, FilterError> {
    registry.apply(query, request, context)
}
