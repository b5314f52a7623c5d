//! Event classification for discovered tables.

pub mod rules;

pub use rules::{classify_table, EventRule, TableKind, EVENT_RULES};
