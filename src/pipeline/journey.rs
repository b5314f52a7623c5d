//! Main journey-building pipeline.
//!
//! Coordinates the full transformation of one Data Graph response:
//! 1. Unwrap the raw payload (data wrapper, json_blob__c)
//! 2. Table discovery
//! 3. Profile extraction
//! 4. Timeline assembly
//! 5. Filter-option counting
//!
//! The pipeline is total over well-formed JSON: everything past the string
//! parse degrades to fewer or default results, never to an error.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::discovery::tables::{discover_tables, Table};
use crate::filter::options::{collect_filter_options, FilterOptions};
use crate::normalize::unwrap::unwrap_response;
use crate::profile::extract::{extract_profile, ProfileData};
use crate::timeline::assemble::{build_timeline, TimelineEvent};

use super::context::QueryContext;

/// Error at the string-input boundary.
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("invalid response JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the UI consumes for one query result.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyResult {
    pub tables: IndexMap<String, Table>,
    pub timeline: Vec<TimelineEvent>,
    pub profile: ProfileData,
    pub filter_options: FilterOptions,
}

/// Process one raw Data Graph response.
///
/// Recomputes everything from the input tree; no caching, no incremental
/// diffing.
pub fn process_response(ctx: &QueryContext, raw: Value) -> JourneyResult {
    let log_ctx = ctx.log_context();

    log::info!(
        "{} RESPONSE_RECEIVED graph={} received_at={}",
        log_ctx,
        ctx.graph_name.as_deref().unwrap_or("unknown"),
        ctx.received_at.to_rfc3339()
    );

    // [1] UNWRAP
    let payload = unwrap_response(raw, &log_ctx);

    // [2] TABLE DISCOVERY
    let tables = discover_tables(&payload, &log_ctx);

    // [3] PROFILE EXTRACTION
    let profile = extract_profile(&payload, &tables, &log_ctx);

    // [4] TIMELINE ASSEMBLY
    let timeline = build_timeline(&tables, &log_ctx);

    // [5] FILTER OPTIONS
    let filter_options = collect_filter_options(&timeline);

    log::info!(
        "{} JOURNEY_COMPLETE tables={} rows={} events={} identifiers={} insights={}",
        log_ctx,
        tables.len(),
        tables.values().map(|t| t.rows.len()).sum::<usize>(),
        timeline.len(),
        profile.identifiers.len(),
        profile.insights.len()
    );

    JourneyResult {
        tables,
        timeline,
        profile,
        filter_options,
    }
}

/// Parse and process a raw response body.
///
/// The only fallible entry point; everything past the parse is total.
pub fn process_response_str(ctx: &QueryContext, raw_json: &str) -> Result<JourneyResult, JourneyError> {
    let raw: Value = serde_json::from_str(raw_json)?;
    Ok(process_response(ctx, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let ctx = QueryContext::new(None);
        let result = process_response_str(&ctx, "not json{");
        assert!(matches!(result, Err(JourneyError::Parse(_))));
    }

    #[test]
    fn test_empty_object_yields_empty_journey() {
        let ctx = QueryContext::new(None);
        let result = process_response(&ctx, json!({}));

        assert!(result.tables.is_empty());
        assert!(result.timeline.is_empty());
        assert_eq!(result.profile.name, "Unknown");
        assert!(result.filter_options.event_types.is_empty());
    }

    #[test]
    fn test_blob_wrapped_response_end_to_end() {
        let inner = json!({
            "first_name__c": "Ada",
            "last_name__c": "Lovelace",
            "WebsiteEngagement": [
                {"event_date_time__c": "2024-01-02T00:00:00Z", "event_type__c": "page_view"}
            ]
        });
        let raw = json!({
            "data": {
                "data": [
                    {"json_blob__c": inner.to_string()}
                ]
            }
        });

        let ctx = QueryContext::new(Some("Customer_360"));
        let result = process_response(&ctx, raw);

        assert_eq!(result.profile.name, "Ada Lovelace");
        assert_eq!(result.timeline.len(), 1);
        assert_eq!(result.timeline[0].event_type, "Website Engagement");
        assert_eq!(
            result.filter_options.event_types,
            vec![("Website Engagement".to_string(), 1)]
        );
    }
}
