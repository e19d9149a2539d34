//! Lenient Coercion of Loosely-Typed Wire Values
//!
//! The cloud feed is noisy about types: numbers arrive as strings, boolean
//! flags as 0/1 integers, timestamps as ISO strings or epoch milliseconds.
//! This module converts such values into their canonical in-memory types and
//! maps every failure to *absence*. Coercion failure is never an error —
//! a field that cannot be understood simply does not exist on the record.
//!
//! Two layers are provided:
//! - Plain functions over [`serde_json::Value`] for callers holding raw
//!   JSON-ish data.
//! - `deserialize_with`/`serialize_with` adapters so record structs absorb
//!   loose wire values directly at the serde boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Fallback datetime formats tried after RFC 3339, most specific first.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Coerce a timestamp-like value to a canonical UTC instant.
///
/// Strings are parsed as RFC 3339, then a few common naive formats (taken as
/// UTC), then a bare date. Finite numbers are epoch milliseconds. Anything
/// else, including strings like `"invalid date"`, yields `None`.
pub fn to_canonical_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            let millis = n.as_f64().filter(|f| f.is_finite())?;
            Utc.timestamp_millis_opt(millis as i64).single()
        }
        _ => None,
    }
}

/// String half of [`to_canonical_timestamp`], for fields already known to be
/// text (e.g. the cloud payload's `current` field).
pub fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Coerce a numeric or numeric-string value to `f64`.
///
/// Strings are trimmed before parsing; an empty string is absent, not zero.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Coerce a flag-like value to `bool`.
///
/// Accepts booleans, the numbers 0/1, and the strings `"true"`/`"false"`
/// (case-insensitive) and `"0"`/`"1"`. Everything else is `None`; callers
/// must treat absence as distinct from `false`.
pub fn to_boolean_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed == "1" || trimmed.eq_ignore_ascii_case("true") {
                Some(true)
            } else if trimmed == "0" || trimmed.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// `deserialize_with` adapter: timestamp-like wire value, unparseable → `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_canonical_timestamp))
}

/// `deserialize_with` adapter: numeric-like wire value, unparseable → `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_number))
}

/// `deserialize_with` adapter: flag-like wire value, unrecognized → `None`.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_boolean_flag))
}

/// `serialize_with` adapter: emit a present flag as the wire's 0/1 integer.
///
/// Paired with `skip_serializing_if = "Option::is_none"`, so the `None` arm
/// only fires for serializers that do not skip.
pub fn flag_as_int<S>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match flag {
        Some(true) => serializer.serialize_u8(1),
        Some(false) => serializer.serialize_u8(0),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_from_rfc3339() {
        let ts = to_canonical_timestamp(&json!("2024-03-01T12:30:00Z")).unwrap();
        assert_eq!(ts.timestamp(), 1_709_296_200);
    }

    #[test]
    fn timestamp_from_epoch_millis() {
        let ts = to_canonical_timestamp(&json!(1_709_296_200_000_i64)).unwrap();
        assert_eq!(ts.timestamp(), 1_709_296_200);
    }

    #[test]
    fn timestamp_from_naive_and_date_forms() {
        assert!(to_canonical_timestamp(&json!("2024-03-01 12:30:00")).is_some());
        assert!(to_canonical_timestamp(&json!("2024-03-01")).is_some());
    }

    #[test]
    fn invalid_timestamp_is_absent() {
        assert_eq!(to_canonical_timestamp(&json!("invalid date")), None);
        assert_eq!(to_canonical_timestamp(&json!("")), None);
        assert_eq!(to_canonical_timestamp(&json!(f64::NAN)), None);
        assert_eq!(to_canonical_timestamp(&json!(null)), None);
        assert_eq!(to_canonical_timestamp(&json!({})), None);
    }

    #[test]
    fn number_from_string_trims() {
        assert_eq!(to_number(&json!("  -55.5 ")), Some(-55.5));
        assert_eq!(to_number(&json!(3.7)), Some(3.7));
    }

    #[test]
    fn number_failures_are_absent() {
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("   ")), None);
        assert_eq!(to_number(&json!("7 dBm")), None);
        assert_eq!(to_number(&json!(true)), None);
    }

    #[test]
    fn flags_accept_bool_digits_and_words() {
        assert_eq!(to_boolean_flag(&json!(true)), Some(true));
        assert_eq!(to_boolean_flag(&json!(1)), Some(true));
        assert_eq!(to_boolean_flag(&json!(0)), Some(false));
        assert_eq!(to_boolean_flag(&json!("TRUE")), Some(true));
        assert_eq!(to_boolean_flag(&json!("False")), Some(false));
        assert_eq!(to_boolean_flag(&json!("1")), Some(true));
        assert_eq!(to_boolean_flag(&json!("0")), Some(false));
    }

    #[test]
    fn flag_absence_is_not_false() {
        assert_eq!(to_boolean_flag(&json!(2)), None);
        assert_eq!(to_boolean_flag(&json!("yes")), None);
        assert_eq!(to_boolean_flag(&json!(null)), None);
    }
}
