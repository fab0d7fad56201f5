//! Canonical timestamp parsing.
//!
//! Clients historically sent instants in several shapes: RFC 3339 strings,
//! `{seconds, nanos}` objects from document-store SDKs, and raw epoch numbers.
//! All inbound instants are normalized here, at the service boundary, into
//! `DateTime<Utc>`; no other module branches on timestamp shape.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::AppError;

// Epoch values at or above this are treated as milliseconds.
const MILLIS_CUTOFF: i64 = 100_000_000_000;

/// Parse a JSON value into a canonical UTC instant.
///
/// Accepted shapes:
/// - RFC 3339 string: `"2024-03-01T12:00:00Z"`
/// - Object: `{"seconds": 1709294400}` or `{"seconds": ..., "nanos": ...}`
/// - Integer epoch seconds or milliseconds
pub fn parse_instant(value: &Value) -> Result<DateTime<Utc>, AppError> {
    match value {
        Value::String(s) => parse_instant_str(s),
        Value::Number(n) => {
            let epoch = n
                .as_i64()
                .ok_or_else(|| AppError::InvalidInput(format!("Invalid epoch timestamp: {}", n)))?;
            from_epoch(epoch)
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .and_then(Value::as_i64)
                .ok_or_else(|| {
                    AppError::InvalidInput("Timestamp object missing 'seconds' field".to_string())
                })?;
            let nanos = map.get("nanos").and_then(Value::as_i64).unwrap_or(0);
            let nanos = u32::try_from(nanos).map_err(|_| {
                AppError::InvalidInput(format!("Timestamp nanos out of range: {}", nanos))
            })?;
            Utc.timestamp_opt(seconds, nanos)
                .single()
                .ok_or_else(|| {
                    AppError::InvalidInput(format!("Timestamp out of range: {}s", seconds))
                })
        }
        other => Err(AppError::InvalidInput(format!(
            "Unsupported timestamp shape: {}",
            other
        ))),
    }
}

/// Parse a string into a canonical UTC instant (RFC 3339 or epoch digits).
pub fn parse_instant_str(s: &str) -> Result<DateTime<Utc>, AppError> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(epoch) = trimmed.parse::<i64>() {
        return from_epoch(epoch);
    }
    Err(AppError::InvalidInput(format!(
        "Invalid timestamp: {}",
        s
    )))
}

fn from_epoch(epoch: i64) -> Result<DateTime<Utc>, AppError> {
    let result = if epoch.abs() >= MILLIS_CUTOFF {
        Utc.timestamp_millis_opt(epoch).single()
    } else {
        Utc.timestamp_opt(epoch, 0).single()
    };
    result.ok_or_else(|| AppError::InvalidInput(format!("Timestamp out of range: {}", epoch)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rfc3339_string() {
        let dt = parse_instant(&json!("2024-03-01T12:00:00Z")).unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_instant(&json!("2024-03-01T14:00:00+02:00")).unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_seconds_object() {
        let dt = parse_instant(&json!({"seconds": 1709294400})).unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_seconds_object_with_nanos() {
        let dt = parse_instant(&json!({"seconds": 1709294400, "nanos": 500_000_000})).unwrap();
        assert_eq!(dt.timestamp_millis(), 1709294400500);
    }

    #[test]
    fn test_parse_epoch_seconds() {
        let dt = parse_instant(&json!(1709294400)).unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_epoch_millis() {
        let dt = parse_instant(&json!(1709294400000_i64)).unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_epoch_string() {
        let dt = parse_instant_str("1709294400").unwrap();
        assert_eq!(dt.timestamp(), 1709294400);
    }

    #[test]
    fn test_rejects_out_of_range_nanos() {
        assert!(parse_instant(&json!({"seconds": 1709294400, "nanos": -1})).is_err());
        assert!(parse_instant(&json!({"seconds": 1709294400, "nanos": 5_000_000_000_i64})).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_instant(&json!("next tuesday")).is_err());
        assert!(parse_instant(&json!(["2024"])).is_err());
        assert!(parse_instant(&json!({"nanos": 5})).is_err());
    }
}
