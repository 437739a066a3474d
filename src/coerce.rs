//! Lenient per-field coercions shared by both pipelines.
//!
//! Every function here is total: a value that cannot be converted yields
//! `None`, never an error. Spreadsheet cells are hand-edited and frequently
//! blank or malformed, so a failed coercion drops the single field and the
//! rest of the row still converts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::CellScalar;

/// Naive formats attempted after RFC 3339 fails. Naive wall-clock input is
/// interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Format a UTC instant as ISO 8601 with a literal `Z` suffix. Subsecond
/// digits are emitted only when the instant has a nonzero millisecond part.
pub fn format_iso_z(instant: DateTime<Utc>) -> String {
    if instant.timestamp_subsec_millis() == 0 {
        instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

/// Parse a date/time string to a UTC instant. Accepts RFC 3339 (any offset,
/// normalized to UTC) and the naive formats above (read as UTC wall clock).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(text) {
        return Some(aware.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

/// True when a string at least starts with a `YYYY-MM-DD` shape. Used to
/// pass unparseable-but-ISO-shaped strings through unchanged instead of
/// dropping them.
fn looks_like_iso(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// Coerce to an ISO 8601 `Z`-suffixed timestamp string.
///
/// Native datetimes are taken as UTC wall clock. Strings are parsed; an
/// unparseable string survives unchanged only when it is ISO-shaped.
/// Numbers and booleans are never timestamps.
pub fn to_timestamp(value: &CellScalar) -> Option<String> {
    match value {
        CellScalar::DateTime(naive) => Some(format_iso_z(naive.and_utc())),
        CellScalar::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match parse_timestamp(trimmed) {
                Some(instant) => Some(format_iso_z(instant)),
                None if looks_like_iso(trimmed) => Some(trimmed.to_string()),
                None => None,
            }
        }
        _ => None,
    }
}

/// Coerce to an integer, falling back to float-then-truncate for strings
/// like `"3.7"` and float cells holding whole numbers.
pub fn to_integer(value: &CellScalar) -> Option<i64> {
    match value {
        CellScalar::Int(i) => Some(*i),
        CellScalar::Number(f) if f.is_finite() => Some(*f as i64),
        CellScalar::Bool(b) => Some(i64::from(*b)),
        CellScalar::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f as i64)
                })
        }
        _ => None,
    }
}

pub fn to_float(value: &CellScalar) -> Option<f64> {
    match value {
        CellScalar::Int(i) => Some(*i as f64),
        CellScalar::Number(f) if f.is_finite() => Some(*f),
        CellScalar::Bool(b) => Some(f64::from(u8::from(*b))),
        CellScalar::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Coerce to a boolean. Numbers are truthy iff nonzero; strings match the
/// usual spreadsheet token sets case-insensitively.
pub fn to_boolean(value: &CellScalar) -> Option<bool> {
    match value {
        CellScalar::Bool(b) => Some(*b),
        CellScalar::Int(i) => Some(*i != 0),
        CellScalar::Number(f) => Some(*f != 0.0),
        CellScalar::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Pass free text through, rendering non-string scalars to their display
/// form. Blank strings count as absent.
pub fn to_text(value: &CellScalar) -> Option<String> {
    match value {
        CellScalar::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        CellScalar::Int(i) => Some(i.to_string()),
        CellScalar::Number(f) => Some(f.to_string()),
        CellScalar::Bool(b) => Some(b.to_string()),
        CellScalar::DateTime(naive) => Some(format_iso_z(naive.and_utc())),
        CellScalar::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellScalar {
        CellScalar::Text(s.to_string())
    }

    #[test]
    fn test_timestamp_z_suffix_roundtrip() {
        assert_eq!(
            to_timestamp(&text("2025-08-10T00:00:00Z")),
            Some("2025-08-10T00:00:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_offset_normalized_to_utc() {
        assert_eq!(
            to_timestamp(&text("2025-08-10T02:30:00+02:00")),
            Some("2025-08-10T00:30:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_naive_read_as_utc() {
        assert_eq!(
            to_timestamp(&text("2025-08-10 14:15:16")),
            Some("2025-08-10T14:15:16Z".to_string())
        );
        assert_eq!(
            to_timestamp(&text("2025-08-10")),
            Some("2025-08-10T00:00:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_native_datetime() {
        let naive = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(
            to_timestamp(&CellScalar::DateTime(naive)),
            Some("2025-03-10T08:00:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_millis_kept() {
        assert_eq!(
            to_timestamp(&text("2025-08-10T00:00:00.250Z")),
            Some("2025-08-10T00:00:00.250Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_iso_shaped_passthrough() {
        // ISO-shaped but unparseable: kept verbatim rather than dropped
        assert_eq!(
            to_timestamp(&text("2025-99-99T00:00:00Z")),
            Some("2025-99-99T00:00:00Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_garbage_dropped() {
        assert_eq!(to_timestamp(&text("next tuesday")), None);
        assert_eq!(to_timestamp(&text("")), None);
        assert_eq!(to_timestamp(&CellScalar::Number(45000.5)), None);
        assert_eq!(to_timestamp(&CellScalar::Empty), None);
    }

    #[test]
    fn test_integer_coercions() {
        assert_eq!(to_integer(&CellScalar::Int(7)), Some(7));
        assert_eq!(to_integer(&CellScalar::Number(3.0)), Some(3));
        assert_eq!(to_integer(&text("42")), Some(42));
        assert_eq!(to_integer(&text("3.7")), Some(3));
        assert_eq!(to_integer(&text("abc")), None);
        assert_eq!(to_integer(&text("")), None);
        assert_eq!(to_integer(&CellScalar::Empty), None);
    }

    #[test]
    fn test_float_coercions() {
        assert_eq!(to_float(&text("0.25")), Some(0.25));
        assert_eq!(to_float(&CellScalar::Int(1)), Some(1.0));
        assert_eq!(to_float(&text("abc")), None);
    }

    #[test]
    fn test_boolean_token_sets() {
        for token in ["true", "T", "yes", "Y", "1", "TRUE"] {
            assert_eq!(to_boolean(&text(token)), Some(true), "token {token}");
        }
        for token in ["false", "F", "no", "N", "0"] {
            assert_eq!(to_boolean(&text(token)), Some(false), "token {token}");
        }
        assert_eq!(to_boolean(&text("maybe")), None);
        assert_eq!(to_boolean(&text("")), None);
        assert_eq!(to_boolean(&CellScalar::Int(2)), Some(true));
        assert_eq!(to_boolean(&CellScalar::Number(0.0)), Some(false));
        assert_eq!(to_boolean(&CellScalar::Bool(true)), Some(true));
    }

    #[test]
    fn test_text_passthrough() {
        assert_eq!(to_text(&text("  ")), None);
        assert_eq!(to_text(&text("Design")), Some("Design".to_string()));
        assert_eq!(to_text(&CellScalar::Int(5)), Some("5".to_string()));
        assert_eq!(to_text(&CellScalar::Empty), None);
    }
}
