//! Per-row timestamp detection.
//!
//! Three tiers: the classification rule's preferred field, a fixed list of
//! common field names, then a full scan in row field order. A candidate is
//! accepted only if it parses to a date with year > 1970, which rejects
//! epoch-zero defaults and non-date numeric fields that happen to parse.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::discovery::tables::RowRecord;

/// Common datetime field names, in priority order.
pub const TIMESTAMP_FIELD_CANDIDATES: &[&str] = &[
    "event_date_time__c",
    "eventDateTime__c",
    "transaction_date_time__c",
    "transactionDateTime__c",
    "order_date_time__c",
    "orderDateTime__c",
    "created_date__c",
    "createdDate__c",
    "ssot__CreatedDate__c",
    "CreatedDate",
    "event_time__c",
    "timestamp__c",
    "date__c",
];

/// Epoch values at or above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Parse a scalar into a UTC instant.
///
/// Strings: RFC 3339, then common naive datetime/date formats. Numbers:
/// Unix epoch in seconds or milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            let raw = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            // No abs(): i64::MIN has no positive counterpart
            let secs = if raw >= EPOCH_MILLIS_THRESHOLD || raw <= -EPOCH_MILLIS_THRESHOLD {
                raw / 1000
            } else {
                raw
            };
            DateTime::from_timestamp(secs, 0)
        }
        _ => None,
    }
}

/// Parse with the year > 1970 validity guard applied.
pub fn parse_valid_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    parse_timestamp(value).filter(|dt| dt.year() > 1970)
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
    }

    None
}

/// Return the field name to use as the row's timestamp, or none.
///
/// Rows with no detectable timestamp are excluded from the timeline by the
/// caller; no synthetic default is invented.
pub fn detect_timestamp_field(row: &RowRecord, preferred: Option<&str>) -> Option<String> {
    if let Some(field) = preferred {
        if row.get(field).and_then(parse_valid_timestamp).is_some() {
            return Some(field.to_string());
        }
    }

    for candidate in TIMESTAMP_FIELD_CANDIDATES {
        if row.get(*candidate).and_then(parse_valid_timestamp).is_some() {
            return Some((*candidate).to_string());
        }
    }

    // Last resort: first field in row order that parses as a valid date
    for (key, value) in row {
        if parse_valid_timestamp(value).is_some() {
            return Some(key.clone());
        }
    }

    None
}
