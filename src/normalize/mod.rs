//! Response unwrapping.

pub mod unwrap;

pub use unwrap::unwrap_response;
