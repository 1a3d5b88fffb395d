//! Scalar coercion: the typing rule for every bare token in a document.

use crate::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap());

/// Types a trimmed token.
///
/// `true`/`false` become booleans, plain decimal numerals become numbers,
/// everything else (including `34px`, `v1.2.3` or `1e5`) stays a string.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{coerce, Value};
///
/// assert_eq!(coerce("true"), Value::Bool(true));
/// assert_eq!(coerce("-1.5"), Value::Number(-1.5));
/// assert_eq!(coerce("34px"), Value::from("34px"));
/// ```
pub fn coerce(token: &str) -> Value {
    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if is_number(token) => match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            // Numerals too long for an f64 stay text.
            _ => Value::String(token.to_string()),
        },
        _ => Value::String(token.to_string()),
    }
}

/// Returns `true` if `token` matches the numeral pattern `-?digits(.digits)?`.
pub(crate) fn is_number(token: &str) -> bool {
    NUMBER.is_match(token)
}

/// Returns `true` if `s` written as a bare token would not read back as the string `s`.
pub(crate) fn coerces_away(s: &str) -> bool {
    s == "true" || s == "false" || is_number(s)
}
