//! Deed field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, RuleBasedDeedParser};

use crate::models::record::ExtractedDeedRecord;

/// Trait for deed parsing.
///
/// Parsing cannot fail: fields that are not found come back empty.
pub trait DeedParser {
    /// Parse a deed from recognized text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Extract a record from OCR text with the default configuration.
pub fn extract_record(text: &str) -> ExtractedDeedRecord {
    RuleBasedDeedParser::new().parse(text).record
}
