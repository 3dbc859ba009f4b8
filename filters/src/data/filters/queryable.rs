//! Query handle abstraction
//!
//! The engine never executes anything. It only composes predicates onto a
//! [`Queryable`], and every composition returns a new handle.

use super::types::FilterValue;

/// Immutable, composable query handle
///
/// Implementations must never mutate `self`: `a.where_equals(..)` leaves
/// `a` yielding exactly what it yielded before.
pub trait Queryable: Clone {
    /// No-op filter
    fn where_all(&self) -> Self;

    /// Exact equality on a column
    fn where_equals(&self, field: &str, value: &FilterValue) -> Self;

    /// Condition template with a single `?` marker bound to `value`
    fn where_raw(&self, condition: &str, value: FilterValue) -> Self;

    /// Case-insensitive equality on a text column
    fn where_equals_ignore_case(&self, field: &str, value: &str) -> Self {
        self.where_raw(
            &format!("lower({}) = ?", field),
            FilterValue::Text(value.to_lowercase()),
        )
    }
}
