//! Calendar-day grouping for the timeline view.

use chrono::Local;
use indexmap::IndexMap;

use crate::timeline::assemble::TimelineEvent;

/// Group events by local calendar day, keyed by a display string like
/// `"June 15, 2024"`.
///
/// Bucket order and order within each bucket follow the (already
/// timestamp-sorted) input order.
pub fn group_by_day(events: &[TimelineEvent]) -> IndexMap<String, Vec<TimelineEvent>> {
    let mut groups: IndexMap<String, Vec<TimelineEvent>> = IndexMap::new();

    for event in events {
        let key = event
            .timestamp
            .with_timezone(&Local)
            .format("%B %-d, %Y")
            .to_string();
        groups.entry(key).or_default().push(event.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::Map;

    fn event(timestamp: DateTime<Utc>, summary: &str) -> TimelineEvent {
        TimelineEvent {
            id: format!("Test-{}", timestamp.timestamp_millis()),
            timestamp,
            event_type: "Event".to_string(),
            table_name: "Test".to_string(),
            summary: summary.to_string(),
            details: Map::new(),
            session_id: None,
            device_type: None,
            cart_id: None,
        }
    }

    fn local_utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, mo, d, h, 0, 0)
            .single()
            .expect("valid local datetime")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_buckets_by_local_day_in_input_order() {
        let events = vec![
            event(local_utc(2024, 6, 15, 18), "later"),
            event(local_utc(2024, 6, 15, 9), "earlier"),
            event(local_utc(2024, 6, 14, 12), "yesterday"),
        ];

        let groups = group_by_day(&events);

        assert_eq!(groups.len(), 2);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys[0], "June 15, 2024");
        assert_eq!(keys[1], "June 14, 2024");

        let day_one = &groups["June 15, 2024"];
        assert_eq!(day_one[0].summary, "later");
        assert_eq!(day_one[1].summary, "earlier");
    }
}
