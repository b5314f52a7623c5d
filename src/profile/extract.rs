//! Profile extraction from the unwrapped payload.
//!
//! Collects top-level scalar fields, resolves the display name through
//! tiered alias fallbacks, builds the ordered identifier list and pulls
//! insight rows out of `__cio`/insight tables. Missing fields degrade to
//! placeholders, never to errors.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::discovery::tables::{flatten_row, RowRecord, Table};
use crate::extraction::fields::{first_string, value_to_string};
use crate::logging::structured::LogContext;

const FIRST_NAME_ALIASES: &[&str] = &[
    "first_name__c",
    "firstName__c",
    "ssot__FirstName__c",
    "FirstName",
];
const LAST_NAME_ALIASES: &[&str] = &[
    "last_name__c",
    "lastName__c",
    "ssot__LastName__c",
    "LastName",
];
const FULL_NAME_ALIASES: &[&str] = &["full_name__c", "fullName__c", "ssot__Name__c"];
const BARE_NAME_ALIASES: &[&str] = &["name__c", "Name", "name"];
const DOB_ALIASES: &[&str] = &[
    "date_of_birth__c",
    "dateOfBirth__c",
    "ssot__BirthDate__c",
    "birth_date__c",
];

/// Ordered identifier extraction rules: (label, field aliases in priority
/// order). At most one identifier per label.
const IDENTIFIER_RULES: &[(&str, &[&str])] = &[
    ("Email", &["email__c", "ssot__PersonEmail__c", "personal_email__c", "email"]),
    ("Phone", &["phone__c", "mobile_phone__c", "ssot__PersonMobilePhone__c", "phone"]),
    ("Customer ID", &["customer_id__c", "customerId__c", "customer_id"]),
    ("Individual ID", &["ssot__Id__c", "individual_id__c", "Id", "id"]),
];

lazy_static! {
    /// Tables feeding the profile name/identifier view.
    static ref PROFILE_PATTERN: Regex = Regex::new(r"(?i)individual|profile").unwrap();

    /// Tables feeding the insights view.
    static ref INSIGHT_PATTERN: Regex = Regex::new(r"(?i)__cio|insight").unwrap();
}

/// Derived profile summary, built once per query result.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub identifiers: Vec<(String, String)>,
    pub insights: Vec<(String, String)>,
    pub raw_fields: RowRecord,
}

/// Extract the profile view from the unwrapped payload and the discovered
/// tables.
pub fn extract_profile(
    payload: &Value,
    tables: &IndexMap<String, Table>,
    ctx: &LogContext,
) -> ProfileData {
    let raw_fields = match payload {
        Value::Object(obj) => flatten_row(obj),
        _ => RowRecord::new(),
    };

    let source = collect_profile_fields(payload, tables, &raw_fields);

    let name = resolve_name(&source);
    let date_of_birth = first_string(&source, DOB_ALIASES);

    let mut identifiers = Vec::new();
    for (label, aliases) in IDENTIFIER_RULES {
        if let Some(value) = first_string(&source, aliases) {
            identifiers.push((label.to_string(), value));
        }
    }

    let insights = extract_insights(tables);

    log::debug!(
        "{} PROFILE_EXTRACTED name={:?} identifiers={} insights={}",
        ctx,
        name,
        identifiers.len(),
        insights.len()
    );

    ProfileData {
        name,
        date_of_birth,
        identifiers,
        insights,
        raw_fields,
    }
}

/// Merge name/identifier sources: top-level scalars, profile-shaped nested
/// objects, and the first row of profile-shaped tables. Earlier sources win.
fn collect_profile_fields(
    payload: &Value,
    tables: &IndexMap<String, Table>,
    raw_fields: &RowRecord,
) -> RowRecord {
    let mut source = raw_fields.clone();

    if let Value::Object(obj) = payload {
        for (key, child) in obj {
            if !PROFILE_PATTERN.is_match(key) {
                continue;
            }
            match child {
                Value::Object(inner) => merge_scalars(&mut source, inner),
                Value::Array(elements) => {
                    if let Some(Value::Object(first)) = elements.first() {
                        merge_scalars(&mut source, first);
                    }
                }
                _ => {}
            }
        }
    }

    for table in tables.values() {
        if PROFILE_PATTERN.is_match(&table.name) {
            if let Some(first) = table.rows.first() {
                merge_scalars(&mut source, first);
            }
        }
    }

    source
}

fn merge_scalars(target: &mut RowRecord, fields: &Map<String, Value>) {
    for (key, value) in flatten_row(fields) {
        target.entry(key).or_insert(value);
    }
}

/// Tiered name resolution: first+last, full name, bare name, "Unknown".
fn resolve_name(source: &RowRecord) -> String {
    let first = first_string(source, FIRST_NAME_ALIASES);
    let last = first_string(source, LAST_NAME_ALIASES);

    match (first, last) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(first), None) => first,
        (None, Some(last)) => last,
        (None, None) => first_string(source, FULL_NAME_ALIASES)
            .or_else(|| first_string(source, BARE_NAME_ALIASES))
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}

/// Pull insight rows out of `__cio`/insight tables.
///
/// Every non-null field except `ssot__Id*` becomes one (label, value) pair
/// with the field name humanized.
fn extract_insights(tables: &IndexMap<String, Table>) -> Vec<(String, String)> {
    let mut insights = Vec::new();

    for table in tables.values() {
        if !INSIGHT_PATTERN.is_match(&table.name) {
            continue;
        }
        for row in &table.rows {
            for (key, value) in row {
                if value.is_null() || key.starts_with("ssot__Id") {
                    continue;
                }
                insights.push((humanize_field(key), value_to_string(value)));
            }
        }
    }

    insights
}

/// Humanize a physical field name for display: strip the `ssot__` prefix
/// and `__c` suffix, split camelCase, convert underscores to spaces.
pub fn humanize_field(field: &str) -> String {
    let stripped = field.strip_prefix("ssot__").unwrap_or(field);
    let stripped = stripped.strip_suffix("__c").unwrap_or(stripped);

    let mut out = String::with_capacity(stripped.len() + 4);
    let mut prev_lower = false;
    for ch in stripped.chars() {
        if ch == '_' {
            if !out.ends_with(' ') {
                out.push(' ');
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        out.push(ch);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::tables::discover_tables;
    use serde_json::json;

    fn ctx() -> LogContext {
        LogContext::new("test-query")
    }

    fn profile_for(payload: serde_json::Value) -> ProfileData {
        let tables = discover_tables(&payload, &ctx());
        extract_profile(&payload, &tables, &ctx())
    }

    #[test]
    fn test_name_from_first_and_last() {
        let profile = profile_for(json!({
            "first_name__c": "Ada",
            "last_name__c": "Lovelace"
        }));
        assert_eq!(profile.name, "Ada Lovelace");
    }

    #[test]
    fn test_name_fallback_tiers() {
        let profile = profile_for(json!({"ssot__Name__c": "Ada Lovelace"}));
        assert_eq!(profile.name, "Ada Lovelace");

        let profile = profile_for(json!({"name": "A. Lovelace"}));
        assert_eq!(profile.name, "A. Lovelace");

        let profile = profile_for(json!({"unrelated": 1}));
        assert_eq!(profile.name, "Unknown");
    }

    #[test]
    fn test_name_from_nested_individual_object() {
        let profile = profile_for(json!({
            "Individual": {
                "firstName__c": "Grace",
                "lastName__c": "Hopper"
            }
        }));
        assert_eq!(profile.name, "Grace Hopper");
    }

    #[test]
    fn test_name_from_profile_table() {
        let profile = profile_for(json!({
            "UnifiedIndividual": [
                {"ssot__FirstName__c": "Grace", "ssot__LastName__c": "Hopper"}
            ]
        }));
        assert_eq!(profile.name, "Grace Hopper");
    }

    #[test]
    fn test_identifiers_one_entry_per_label_priority_order() {
        let profile = profile_for(json!({
            "email__c": "ada@example.com",
            "email": "secondary@example.com",
            "phone": "555-123-4567"
        }));

        assert_eq!(
            profile.identifiers,
            vec![
                ("Email".to_string(), "ada@example.com".to_string()),
                ("Phone".to_string(), "555-123-4567".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_fields_are_top_level_scalars_only() {
        let profile = profile_for(json!({
            "first_name__c": "Ada",
            "nested": {"x": 1},
            "rows": [{"y": 2}]
        }));

        assert!(profile.raw_fields.contains_key("first_name__c"));
        assert!(!profile.raw_fields.contains_key("nested"));
        assert!(!profile.raw_fields.contains_key("rows"));
    }

    #[test]
    fn test_insights_from_cio_table() {
        let profile = profile_for(json!({
            "TotalSpend__cio": [
                {
                    "ssot__Id__c": "ignored",
                    "ssot__TotalSpendLast30Days__c": 1250.75,
                    "empty__c": null
                }
            ]
        }));

        assert_eq!(
            profile.insights,
            vec![("Total Spend Last30 Days".to_string(), "1250.75".to_string())]
        );
    }

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("ssot__FirstName__c"), "First Name");
        assert_eq!(humanize_field("merchant_name__c"), "merchant name");
        assert_eq!(humanize_field("favoriteCategory"), "favorite Category");
    }

    #[test]
    fn test_date_of_birth_alias() {
        let profile = profile_for(json!({"ssot__BirthDate__c": "1990-04-01"}));
        assert_eq!(profile.date_of_birth.as_deref(), Some("1990-04-01"));
    }
}
