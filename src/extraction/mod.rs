//! Field-alias resolution and scalar conversion.
//!
//! Data Cloud surfaces the same logical attribute under several physical
//! field names depending on how the stream was mapped (`merchant_name__c`,
//! `merchantName__c`, `ssot__MerchantName__c`, ...). Everything that reads
//! a row resolves attributes through the alias helpers here.

pub mod fields;

pub use fields::{first_number, first_present, first_string, value_to_string};
