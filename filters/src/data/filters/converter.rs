//! Raw value conversion
//!
//! Turns a validated raw value into its native representation.

use super::error::FilterError;
use super::types::{FieldType, FilterValue, PrimitiveType};
use super::validator::parse_boolean_token;

/// Convert a raw value that already passed [`validate_value`](super::validate_value)
///
/// Custom types pass the raw string through untouched. Unvalidated input is
/// reported as `InvalidValue` rather than panicking.
pub fn convert_value(field_type: &FieldType, raw: &str) -> Result<FilterValue, FilterError> {
    let primitive = match field_type {
        FieldType::Primitive(primitive) => primitive,
        FieldType::Custom(_) => return Ok(FilterValue::Text(raw.to_string())),
    };

    match primitive {
        PrimitiveType::String | PrimitiveType::Text => Ok(FilterValue::Text(raw.to_string())),
        PrimitiveType::Boolean => parse_boolean_token(raw)
            .map(FilterValue::Boolean)
            .ok_or_else(|| FilterError::invalid_value(raw)),
        PrimitiveType::Bigint | PrimitiveType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(FilterValue::Integer)
            .map_err(|_| FilterError::invalid_value(raw)),
        PrimitiveType::Decimal | PrimitiveType::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(FilterValue::Float)
            .ok_or_else(|| FilterError::invalid_value(raw)),
    }
}
