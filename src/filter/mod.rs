//! Filtering, grouping and filter-option counting over the timeline.

pub mod criteria;
pub mod grouping;
pub mod options;

pub use criteria::{apply_filters, apply_filters_now, ActiveFilters, TimeRange};
pub use grouping::group_by_day;
pub use options::{collect_filter_options, FilterOptions};
