//! Timeline assembly.
//!
//! Turns classified tables into a unified, time-ordered event list, most
//! recent first. Rows without a detectable timestamp are skipped.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::rules::{
    classify_table, TableKind, CART_ALIASES, DEVICE_ALIASES, GENERIC_EVENT_LABEL,
    GENERIC_EVENT_SUMMARY, SESSION_ALIASES,
};
use crate::discovery::tables::{RowRecord, Table};
use crate::extraction::fields::first_string;
use crate::logging::structured::LogContext;
use crate::timeline::timestamp::{detect_timestamp_field, parse_valid_timestamp};

/// One event on the customer journey timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent {
    /// Unique given unique (table, row index, timestamp) triples.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub table_name: String,
    pub summary: String,
    pub details: RowRecord,
    pub session_id: Option<String>,
    pub device_type: Option<String>,
    pub cart_id: Option<String>,
}

/// Build the timeline across all discovered tables.
///
/// Sorted by timestamp descending; the sort is stable, so events with equal
/// timestamps keep insertion (discovery) order.
pub fn build_timeline(tables: &IndexMap<String, Table>, ctx: &LogContext) -> Vec<TimelineEvent> {
    let mut events = Vec::new();

    for table in tables.values() {
        let table_ctx = ctx.with_table(&table.name);

        let (label, preferred, summarize) = match classify_table(&table.name) {
            TableKind::NonEvent => {
                log::debug!("{} TABLE_SKIPPED kind=non_event", table_ctx);
                continue;
            }
            TableKind::Event(rule) => (rule.label, Some(rule.date_field), Some(rule.summarize)),
            TableKind::Generic => (GENERIC_EVENT_LABEL, None, None),
        };

        let mut skipped = 0usize;

        for (index, row) in table.rows.iter().enumerate() {
            let timestamp = match detect_timestamp_field(row, preferred)
                .and_then(|field| row.get(&field).and_then(parse_valid_timestamp))
            {
                Some(ts) => ts,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let summary = match summarize {
                Some(summarize) => summarize(row),
                None => GENERIC_EVENT_SUMMARY.to_string(),
            };

            events.push(TimelineEvent {
                id: format!("{}-{}-{}", table.name, index, timestamp.timestamp_millis()),
                timestamp,
                event_type: label.to_string(),
                table_name: table.name.clone(),
                summary,
                details: row.clone(),
                session_id: first_string(row, SESSION_ALIASES),
                device_type: first_string(row, DEVICE_ALIASES),
                cart_id: first_string(row, CART_ALIASES),
            });
        }

        if skipped > 0 {
            log::debug!(
                "{} ROWS_SKIPPED reason=no_timestamp count={}",
                table_ctx,
                skipped
            );
        }
    }

    // Stable sort: equal timestamps keep discovery order
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    log::debug!("{} TIMELINE_BUILT events={}", ctx, events.len());

    events
}
