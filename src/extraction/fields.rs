//! Alias-fallback field resolution.
//!
//! Resolves a logical attribute by trying several known physical field
//! names in priority order, returning the first present, non-null value.

use serde_json::{Map, Value};

/// Return the first alias that is present and non-null in the row.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use datagraph_journey::extraction::first_present;
///
/// let row = json!({"merchantName__c": "Amazon.com"});
/// let row = row.as_object().unwrap();
/// let value = first_present(row, &["merchant_name__c", "merchantName__c"]);
/// assert_eq!(value, Some(&json!("Amazon.com")));
/// ```
pub fn first_present<'a>(row: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    for alias in aliases {
        if let Some(value) = row.get(*alias) {
            if !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// Resolve an alias list to a display string, if any alias is present.
pub fn first_string(row: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    first_present(row, aliases).map(value_to_string)
}

/// Resolve an alias list to a float, if any alias is present and numeric.
pub fn first_number(row: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    first_present(row, aliases).and_then(value_to_float)
}

/// Convert a scalar JSON value to a display string.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(), // arrays and objects as JSON strings
    }
}

/// Convert a JSON value to a float if possible.
pub fn value_to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
