//! Data Graph response unwrapping.
//!
//! Data Graph responses arrive double-wrapped: an outer `data` object, and
//! often an inner `data` array whose records carry the real payload as a
//! JSON-encoded string in `json_blob__c`. The unwrapper peels both layers
//! and never fails; a malformed blob degrades to the un-parsed structure.

use serde_json::Value;

use crate::logging::structured::LogContext;

/// Field holding the JSON-encoded payload inside a `data` array record.
pub const JSON_BLOB_FIELD: &str = "json_blob__c";

/// Produce the logical payload from a raw Data Graph response.
///
/// 1. If the value has a `data` property holding an object, replace the
///    value with that inner object (one level only, not recursive).
/// 2. If the result has a `data` property holding an array, the first
///    element carrying `json_blob__c` decides: if its string content parses
///    as JSON the parsed object is returned. Later elements are never
///    inspected, matching the original engine's behavior.
/// 3. A missing blob or a parse failure falls back to the already-unwrapped
///    object. This function never errors.
pub fn unwrap_response(raw: Value, ctx: &LogContext) -> Value {
    let payload = unwrap_data_object(raw, ctx);

    match parse_json_blob(&payload, ctx) {
        Some(parsed) => parsed,
        None => payload,
    }
}

/// Peel one level of `data` object wrapping.
fn unwrap_data_object(raw: Value, ctx: &LogContext) -> Value {
    match raw {
        Value::Object(mut obj) => {
            if obj.get("data").map_or(false, Value::is_object) {
                log::debug!("{} UNWRAP_DATA_OBJECT", ctx);
                if let Some(inner) = obj.remove("data") {
                    return inner;
                }
            }
            Value::Object(obj)
        }
        other => other,
    }
}

/// Find and parse the first `json_blob__c` inside a `data` array.
fn parse_json_blob(payload: &Value, ctx: &LogContext) -> Option<Value> {
    let elements = payload.get("data").and_then(Value::as_array)?;

    // First element carrying the blob field wins; a failed parse does not
    // continue the scan.
    let blob = elements
        .iter()
        .find_map(|element| element.get(JSON_BLOB_FIELD))?;

    let text = match blob.as_str() {
        Some(text) => text,
        None => {
            log::warn!("{} UNWRAP_BLOB_NOT_STRING", ctx);
            return None;
        }
    };

    match serde_json::from_str(text) {
        Ok(parsed) => {
            log::debug!("{} UNWRAP_BLOB_PARSED bytes={}", ctx, text.len());
            Some(parsed)
        }
        Err(e) => {
            log::warn!("{} UNWRAP_BLOB_PARSE_FAILED error={}", ctx, e);
            None
        }
    }
}
