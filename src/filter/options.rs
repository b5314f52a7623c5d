//! Distinct values and counts for the filter UI controls.

use indexmap::IndexMap;
use serde::Serialize;

use crate::timeline::assemble::TimelineEvent;

/// Distinct values plus occurrence counts per filterable dimension, in
/// first-seen (timeline) order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOptions {
    pub event_types: Vec<(String, usize)>,
    pub sessions: Vec<(String, usize)>,
    pub devices: Vec<(String, usize)>,
    pub carts: Vec<(String, usize)>,
}

/// Count distinct values across the timeline for each filter dimension.
pub fn collect_filter_options(events: &[TimelineEvent]) -> FilterOptions {
    let mut event_types: IndexMap<String, usize> = IndexMap::new();
    let mut sessions: IndexMap<String, usize> = IndexMap::new();
    let mut devices: IndexMap<String, usize> = IndexMap::new();
    let mut carts: IndexMap<String, usize> = IndexMap::new();

    for event in events {
        *event_types.entry(event.event_type.clone()).or_insert(0) += 1;
        if let Some(session) = &event.session_id {
            *sessions.entry(session.clone()).or_insert(0) += 1;
        }
        if let Some(device) = &event.device_type {
            *devices.entry(device.clone()).or_insert(0) += 1;
        }
        if let Some(cart) = &event.cart_id {
            *carts.entry(cart.clone()).or_insert(0) += 1;
        }
    }

    FilterOptions {
        event_types: event_types.into_iter().collect(),
        sessions: sessions.into_iter().collect(),
        devices: devices.into_iter().collect(),
        carts: carts.into_iter().collect(),
    }
}
