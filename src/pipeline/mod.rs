//! Journey pipeline orchestration.

pub mod context;
pub mod journey;

pub use context::QueryContext;
pub use journey::{process_response, process_response_str, JourneyError, JourneyResult};
