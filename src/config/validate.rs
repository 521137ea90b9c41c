//! Natural-number validation for numeric configuration values.

use serde_json::Value;

use super::ConfigError;

/// Accepts `value` only if it is an integer strictly greater than zero.
///
/// Integral floats such as `5.0` are accepted; strings, booleans, fractions,
/// zero and negative numbers are not.
///
/// # Errors
///
/// Returns [`ConfigError::NotNaturalNumber`] naming `field` otherwise.
pub fn natural_number(field: &'static str, value: &Value) -> Result<u64, ConfigError> {
    let rejected = || ConfigError::NotNaturalNumber { field };

    let Value::Number(number) = value else {
        return Err(rejected());
    };

    if let Some(n) = number.as_u64() {
        return if n > 0 { Ok(n) } else { Err(rejected()) };
    }

    // Negative integers and non-integral floats land here
    let float = number.as_f64().ok_or_else(rejected)?;
    if float.fract() == 0.0 && float >= 1.0 && float <= u64::MAX as f64 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Ok(float as u64);
    }

    Err(rejected())
}

/// Narrows a validated natural number to `u32`.
///
/// # Errors
///
/// Returns [`ConfigError::OutOfRange`] if `n` does not fit.
pub fn to_u32(field: &'static str, n: u64) -> Result<u32, ConfigError> {
    u32::try_from(n).map_err(|_| ConfigError::OutOfRange {
        field,
        max: u64::from(u32::MAX),
    })
}
