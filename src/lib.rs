//! datagraph-journey - Data Graph response normalization and journey pipeline
//!
//! This crate turns arbitrarily nested Salesforce Data Cloud Data Graph
//! responses into browsable tables and a time-ordered customer journey.
//! The implementation prioritizes:
//!
//! 1. **Totality** - past the input parse, every path degrades to fewer or
//!    default results instead of erroring
//! 2. **Logging** - every decision point logged with query context
//! 3. **Determinism** - response field order is preserved end to end
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `normalize` - response unwrapping (data wrapper, json_blob__c)
//! - `discovery` - cycle-guarded table discovery and row flattening
//! - `classify` - ordered event-classification rules
//! - `timeline` - timestamp detection and timeline assembly
//! - `profile` - profile, identifier and insight extraction
//! - `filter` - filtering, calendar grouping, filter-option counts
//! - `extraction` - field-alias resolution helpers
//! - `pipeline` - orchestrator tying the stages together
//! - `logging` - structured logging with query context

pub mod classify;
pub mod discovery;
pub mod extraction;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod timeline;

#[cfg(feature = "python")]
mod python;

pub use discovery::{discover_tables, RowRecord, Table};
pub use filter::{apply_filters, apply_filters_now, group_by_day, ActiveFilters, FilterOptions, TimeRange};
pub use normalize::unwrap_response;
pub use pipeline::{process_response, process_response_str, JourneyError, JourneyResult, QueryContext};
pub use profile::{extract_profile, ProfileData};
pub use timeline::{build_timeline, TimelineEvent};

/// Initialize the module-level logger.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
