//! Rule-based field extractors for recorded deeds.
//!
//! Every field is extracted by an ordered list of rules. The first rule whose
//! capture survives the field's validity filter wins; later rules are only
//! consulted when every earlier one failed, so they must be less specific.

pub mod patterns;
pub mod normalize;
pub mod parcel;
pub mod grantee;
pub mod address;
pub mod city;
pub mod county;
pub mod legal;
pub mod recording;

pub use parcel::{extract_parcel_number, format_parcel_number, ParcelExtractor};
pub use grantee::{extract_grantee, grantee_becomes_grantor, GranteeExtractor};
pub use address::{extract_property_address, AddressExtractor};
pub use city::{extract_city, CityExtractor};
pub use county::{extract_county, CountyExtractor};
pub use legal::{extract_legal_description, LegalDescriptionExtractor, EXHIBIT_A_FALLBACK};
pub use recording::{extract_recording_date, parse_recording_date};

use regex::Regex;
use tracing::trace;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every validated candidate, in rule order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A candidate value together with where it came from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
    /// Name of the rule that produced the value.
    pub rule: &'static str,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
            rule: "",
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = rule;
        self
    }
}

/// One entry of a field's ordered rule list.
pub struct Rule {
    /// Rule name, reported with the match.
    pub name: &'static str,
    /// Pattern whose first capture group is the candidate.
    pub pattern: &'static Regex,
    /// Confidence attached to values from this rule.
    pub confidence: f32,
    /// Turns the raw capture into the field value.
    pub normalize: fn(&str) -> String,
    /// Structural sanity check on the normalized value.
    pub validate: fn(&str) -> bool,
}

impl Rule {
    /// Apply the rule to the first match of its pattern in `text`.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(text)?;
        let group = caps.get(1)?;
        let value = (self.normalize)(group.as_str());

        if !(self.validate)(&value) {
            trace!("Rule {} rejected candidate {:?}", self.name, value);
            return None;
        }

        Some(
            ExtractionMatch::new(value, self.confidence, group.as_str())
                .with_position(group.start(), group.end())
                .with_rule(self.name),
        )
    }
}

/// First validated match from an ordered rule list.
pub fn first_match(rules: &[Rule], text: &str) -> Option<ExtractionMatch<String>> {
    rules.iter().find_map(|rule| rule.apply(text))
}

/// Every validated match from an ordered rule list.
pub fn all_matches(rules: &[Rule], text: &str) -> Vec<ExtractionMatch<String>> {
    rules.iter().filter_map(|rule| rule.apply(text)).collect()
}
