//! Timeline filtering.
//!
//! Pure functions over (events, filters): the UI owns and mutates
//! `ActiveFilters`; filtering is a read. `apply_filters` takes an explicit
//! `now` so the calendar-boundary semantics are deterministic under test;
//! `apply_filters_now` is the convenience wrapper.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timeline::assemble::TimelineEvent;

/// Time-range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "custom")]
    Custom,
}

/// UI-held filter state.
///
/// An empty event-type set means all types pass; a `None` equality filter
/// means no constraint on that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveFilters {
    #[serde(default)]
    pub event_types: HashSet<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub cart_id: Option<String>,
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default)]
    pub custom_start: Option<NaiveDate>,
    #[serde(default)]
    pub custom_end: Option<NaiveDate>,
}

/// Filter the timeline against the active filters, relative to `now`.
pub fn apply_filters(
    events: &[TimelineEvent],
    filters: &ActiveFilters,
    now: DateTime<Local>,
) -> Vec<TimelineEvent> {
    events
        .iter()
        .filter(|event| passes(event, filters, now))
        .cloned()
        .collect()
}

/// Filter relative to the current wall clock.
pub fn apply_filters_now(events: &[TimelineEvent], filters: &ActiveFilters) -> Vec<TimelineEvent> {
    apply_filters(events, filters, Local::now())
}

fn passes(event: &TimelineEvent, filters: &ActiveFilters, now: DateTime<Local>) -> bool {
    if !filters.event_types.is_empty() && !filters.event_types.contains(&event.event_type) {
        return false;
    }

    if let Some(session) = &filters.session_id {
        if event.session_id.as_deref() != Some(session.as_str()) {
            return false;
        }
    }

    if let Some(device) = &filters.device_type {
        if event.device_type.as_deref() != Some(device.as_str()) {
            return false;
        }
    }

    if let Some(cart) = &filters.cart_id {
        if event.cart_id.as_deref() != Some(cart.as_str()) {
            return false;
        }
    }

    in_time_range(event.timestamp, filters, now)
}

fn in_time_range(timestamp: DateTime<Utc>, filters: &ActiveFilters, now: DateTime<Local>) -> bool {
    let local_date = timestamp.with_timezone(&now.timezone()).date_naive();

    match filters.time_range {
        TimeRange::All => true,
        // Calendar-day boundary, not a rolling 24h window
        TimeRange::Today => local_date >= now.date_naive(),
        TimeRange::Last7Days => timestamp >= (now - Duration::days(7)).with_timezone(&Utc),
        TimeRange::Last30Days => timestamp >= (now - Duration::days(30)).with_timezone(&Utc),
        TimeRange::Last90Days => timestamp >= (now - Duration::days(90)).with_timezone(&Utc),
        TimeRange::Custom => {
            // Inclusive of [start, end-of-end-day]; either bound may be open
            if let Some(start) = filters.custom_start {
                if local_date < start {
                    return false;
                }
            }
            if let Some(end) = filters.custom_end {
                if local_date > end {
                    return false;
                }
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Map;

    fn event(event_type: &str, timestamp: DateTime<Utc>) -> TimelineEvent {
        TimelineEvent {
            id: format!("{}-{}", event_type, timestamp.timestamp_millis()),
            timestamp,
            event_type: event_type.to_string(),
            table_name: "Test".to_string(),
            summary: "Activity".to_string(),
            details: Map::new(),
            session_id: Some("SESS-1".to_string()),
            device_type: Some("mobile".to_string()),
            cart_id: None,
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .expect("valid local datetime")
    }

    fn local_utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, mo, d, h, 0, 0)
            .single()
            .expect("valid local datetime")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_empty_type_set_passes_all() {
        let events = vec![event("Transaction", local_utc(2024, 6, 15, 10))];
        let filters = ActiveFilters::default();

        assert_eq!(apply_filters(&events, &filters, fixed_now()).len(), 1);
    }

    #[test]
    fn test_type_set_excludes_non_members() {
        let events = vec![
            event("Transaction", local_utc(2024, 6, 15, 10)),
            event("Order", local_utc(2024, 6, 15, 11)),
        ];
        let filters = ActiveFilters {
            event_types: HashSet::from(["Order".to_string()]),
            ..Default::default()
        };

        let filtered = apply_filters(&events, &filters, fixed_now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].event_type, "Order");
    }

    #[test]
    fn test_today_is_a_calendar_boundary() {
        // 20:00 yesterday is within 24h of noon today but out of range
        let events = vec![
            event("Transaction", local_utc(2024, 6, 14, 20)),
            event("Transaction", local_utc(2024, 6, 15, 1)),
        ];
        let filters = ActiveFilters {
            time_range: TimeRange::Today,
            ..Default::default()
        };

        let filtered = apply_filters(&events, &filters, fixed_now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].timestamp, local_utc(2024, 6, 15, 1));
    }

    #[test]
    fn test_rolling_window() {
        let events = vec![
            event("Transaction", local_utc(2024, 6, 10, 12)),
            event("Transaction", local_utc(2024, 6, 1, 12)),
        ];
        let filters = ActiveFilters {
            time_range: TimeRange::Last7Days,
            ..Default::default()
        };

        let filtered = apply_filters(&events, &filters, fixed_now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].timestamp, local_utc(2024, 6, 10, 12));
    }

    #[test]
    fn test_custom_range_inclusive_of_end_day() {
        let events = vec![
            event("Transaction", local_utc(2024, 6, 10, 23)),
            event("Transaction", local_utc(2024, 6, 11, 1)),
        ];
        let filters = ActiveFilters {
            time_range: TimeRange::Custom,
            custom_start: NaiveDate::from_ymd_opt(2024, 6, 1),
            custom_end: NaiveDate::from_ymd_opt(2024, 6, 10),
            ..Default::default()
        };

        let filtered = apply_filters(&events, &filters, fixed_now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].timestamp, local_utc(2024, 6, 10, 23));
    }

    #[test]
    fn test_custom_range_open_bounds() {
        let events = vec![event("Transaction", local_utc(2020, 1, 1, 0))];
        let filters = ActiveFilters {
            time_range: TimeRange::Custom,
            ..Default::default()
        };

        assert_eq!(apply_filters(&events, &filters, fixed_now()).len(), 1);
    }

    #[test]
    fn test_equality_filters() {
        let events = vec![event("Transaction", local_utc(2024, 6, 15, 10))];

        let matching = ActiveFilters {
            session_id: Some("SESS-1".to_string()),
            device_type: Some("mobile".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&events, &matching, fixed_now()).len(), 1);

        let wrong_session = ActiveFilters {
            session_id: Some("SESS-2".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&events, &wrong_session, fixed_now()).is_empty());

        // cart filter requires a cart id on the event
        let cart = ActiveFilters {
            cart_id: Some("CART-1".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&events, &cart, fixed_now()).is_empty());
    }

    #[test]
    fn test_wall_clock_wrapper_matches_explicit_now() {
        // Type-only filters ignore `now`, so the wall-clock wrapper must
        // agree with the explicit form regardless of when the test runs
        let events = vec![
            event("Transaction", local_utc(2024, 6, 15, 10)),
            event("Order", local_utc(2024, 6, 15, 11)),
        ];
        let filters = ActiveFilters {
            event_types: HashSet::from(["Transaction".to_string()]),
            ..Default::default()
        };

        let via_wrapper = apply_filters_now(&events, &filters);
        let via_explicit = apply_filters(&events, &filters, Local::now());

        assert_eq!(via_wrapper.len(), 1);
        assert_eq!(via_wrapper[0].event_type, "Transaction");
        assert_eq!(via_wrapper.len(), via_explicit.len());
    }

    #[test]
    fn test_time_range_serde_labels() {
        assert_eq!(serde_json::to_string(&TimeRange::Last7Days).unwrap(), "\"7d\"");
        let parsed: TimeRange = serde_json::from_str("\"today\"").unwrap();
        assert_eq!(parsed, TimeRange::Today);
    }
}
