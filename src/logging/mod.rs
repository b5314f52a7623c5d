//! Structured logging with query context.

pub mod structured;

pub use structured::LogContext;
