//! Profile, identifier and insight extraction.

pub mod extract;

pub use extract::{extract_profile, humanize_field, ProfileData};
