//! Permissive value coercion
//!
//! Missing, null, zero, empty and non-numeric values are all treated as
//! "absent" so the field default applies. Numeric strings are accepted.

use serde_json::Value;

/// Default values for every numeric opponent/chamber field
pub mod defaults {
    pub const BASE_HP: f64 = 0.0;
    pub const BASE_ATK: f64 = 0.0;
    pub const BASE_DEF: f64 = 0.0;
    pub const HP_MULTIPLIER: f64 = 1.0;
    /// Percent
    pub const HP_MODIFIER: f64 = 100.0;
    pub const LEVEL: f64 = 1.0;
    pub const QTY: f64 = 1.0;
    pub const CYCLES: f64 = 0.0;
    pub const REWARD_QTY: i64 = 1;
}

/// Usable number carried by `value`, or `None` when the default should apply
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    (n.is_finite() && n != 0.0).then_some(n)
}

pub fn number_or(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(number).unwrap_or(default)
}

/// Whole number carried by `value`. Zero counts as a valid integer here.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Display text for scalar values; structured values yield `None`
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like `text`, but empty strings count as absent
pub fn non_empty_text(value: &Value) -> Option<String> {
    text(value).filter(|s| !s.is_empty())
}

/// Round half up to the nearest integer
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(number(&json!(12.5)), Some(12.5));
        assert_eq!(number(&json!("  40 ")), Some(40.0));
        assert_eq!(number(&json!(true)), Some(1.0));
    }

    #[test]
    fn test_number_rejects_absent_like_values() {
        assert_eq!(number(&json!(0)), None);
        assert_eq!(number(&json!("")), None);
        assert_eq!(number(&json!("abc")), None);
        assert_eq!(number(&json!(null)), None);
        assert_eq!(number(&json!(false)), None);
        assert_eq!(number(&json!([1])), None);
        assert_eq!(number(&json!("NaN")), None);
    }

    #[test]
    fn test_number_or_default() {
        assert_eq!(number_or(None, defaults::HP_MODIFIER), 100.0);
        assert_eq!(number_or(Some(&json!(0)), defaults::QTY), 1.0);
        assert_eq!(number_or(Some(&json!(3)), defaults::QTY), 3.0);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(&json!(4)), Some(4));
        assert_eq!(integer(&json!(4.0)), Some(4));
        assert_eq!(integer(&json!(4.5)), None);
        assert_eq!(integer(&json!("12")), Some(12));
        assert_eq!(integer(&json!(0)), Some(0));
        assert_eq!(integer(&json!("x")), None);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(162.889), 163);
    }
}
