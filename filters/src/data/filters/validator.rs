//! Raw value validation
//!
//! Pure checks of a caller-supplied string against a declared filter type.
//!
//! Recognised boolean tokens (trimmed, ASCII case-insensitive):
//! - true: `true`, `t`, `yes`, `y`, `on`, `1`
//! - false: `false`, `f`, `no`, `n`, `off`, `0`
//!
//! Integers are base-10 with an optional sign and must fit in `i64`.
//! Decimals allow an optional sign and fractional part and must be finite
//! as `f64`; exponents, `inf` and `nan` are rejected.

use std::sync::LazyLock;

use regex::Regex;

use super::definitions::Definitions;
use super::error::FilterError;
use super::types::{FieldType, PrimitiveType};

pub const TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y", "on", "1"];
pub const FALSE_TOKENS: &[&str] = &["false", "f", "no", "n", "off", "0"];

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("Invalid regex"));
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("Invalid regex"));

/// Map a raw value onto a boolean token
pub fn parse_boolean_token(raw: &str) -> Option<bool> {
    let token = raw.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Shape checks on raw filter values
pub trait RawValueExt {
    fn is_boolean_value(&self) -> bool;
    fn is_integer_value(&self) -> bool;
    fn is_decimal_value(&self) -> bool;
}

impl RawValueExt for str {
    fn is_boolean_value(&self) -> bool {
        parse_boolean_token(self).is_some()
    }

    fn is_integer_value(&self) -> bool {
        let trimmed = self.trim();
        INTEGER_RE.is_match(trimmed) && trimmed.parse::<i64>().is_ok()
    }

    fn is_decimal_value(&self) -> bool {
        let trimmed = self.trim();
        DECIMAL_RE.is_match(trimmed) && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
    }
}

/// Check that a filter type is usable at declaration time
pub fn validate_field_type(
    field_type: &FieldType,
    definitions: &dyn Definitions,
) -> Result<(), FilterError> {
    match field_type {
        FieldType::Primitive(_) => Ok(()),
        FieldType::Custom(name) if definitions.has_custom_type(name) => Ok(()),
        FieldType::Custom(name) => Err(FilterError::argument(format!(
            "{} is not a valid filter type",
            name
        ))),
    }
}

/// Validate a raw value against a filter type
pub fn validate_value(
    field_type: &FieldType,
    raw: &str,
    definitions: &dyn Definitions,
) -> Result<(), FilterError> {
    let valid = match field_type {
        FieldType::Primitive(PrimitiveType::String | PrimitiveType::Text) => true,
        FieldType::Primitive(PrimitiveType::Boolean) => raw.is_boolean_value(),
        FieldType::Primitive(PrimitiveType::Bigint | PrimitiveType::Integer) => {
            raw.is_integer_value()
        }
        FieldType::Primitive(PrimitiveType::Decimal | PrimitiveType::Float) => {
            raw.is_decimal_value()
        }
        FieldType::Custom(name) => {
            validate_field_type(field_type, definitions)?;
            definitions.invoke_custom_type(name, raw)
        }
    };

    if valid {
        Ok(())
    } else {
        Err(FilterError::invalid_value(raw))
    }
}
