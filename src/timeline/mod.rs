//! Timestamp detection and timeline assembly.

pub mod assemble;
pub mod timestamp;

pub use assemble::{build_timeline, TimelineEvent};
pub use timestamp::{detect_timestamp_field, parse_timestamp, parse_valid_timestamp};
