//! Table discovery over nested Data Graph payloads.

pub mod tables;

pub use tables::{discover_tables, flatten_row, RowRecord, Table};
