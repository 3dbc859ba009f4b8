//! Filter error type
//!
//! Every failure the engine can report, from declaration mistakes to
//! rejected requests. Hosts map these onto their own error representation
//! using [`FilterError::code`] and [`FilterError::is_client_error`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// Malformed call shape or invalid filter declaration
    #[error("{0}")]
    Argument(String),

    /// A supplied filter value is empty
    #[error("Filter value cannot be blank: {0}")]
    BlankValue(String),

    /// No filter registered under this name
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Value failed type validation
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Raised by a predicate builder when the caller may not use the filter
    #[error("Forbidden filter: {0}")]
    Forbidden(String),

    /// Any other failure raised by a predicate builder
    #[error("Filter {filter} rejected: {reason}")]
    Rejected { filter: String, reason: String },

    /// Request carries more filters than allowed
    #[error("Maximum {max} filters allowed")]
    TooManyFilters { max: usize },

    /// A single value exceeds the configured length
    #[error("Value for filter {filter} exceeds maximum length of {max} bytes")]
    ValueTooLong { filter: String, max: usize },
}

impl FilterError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    pub fn invalid_value(value: impl Into<String>) -> Self {
        Self::InvalidValue(value.into())
    }

    pub fn forbidden(filter: impl Into<String>) -> Self {
        Self::Forbidden(filter.into())
    }

    pub fn rejected(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Argument(_) => "INVALID_ARGUMENT",
            Self::BlankValue(_) => "BLANK_VALUE",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::InvalidValue(_) => "INVALID_VALUE",
            Self::Forbidden(_) => "FORBIDDEN_FILTER",
            Self::Rejected { .. } => "FILTER_REJECTED",
            Self::TooManyFilters { .. } => "TOO_MANY_FILTERS",
            Self::ValueTooLong { .. } => "VALUE_TOO_LONG",
        }
    }

    /// Whether the caller's input caused the error (as opposed to a broken
    /// filter declaration)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Argument(_))
    }
}
