//! Assessor's parcel number (APN) extraction.

use lazy_static::lazy_static;

use super::patterns::{
    APN_AP_HASH, APN_ASSESSOR_PARCEL, APN_BARE, APN_BEARING_ASSESSOR, APN_LABELED,
    APN_PARCEL_NUMBER,
};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};

/// Minimum digit count for a plausible APN.
pub const MIN_PARCEL_DIGITS: usize = 10;

lazy_static! {
    static ref PARCEL_RULES: Vec<Rule> = vec![
        Rule {
            name: "assessor_identification_number",
            pattern: &*APN_BEARING_ASSESSOR,
            confidence: 0.95,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
        Rule {
            name: "ap_hash",
            pattern: &*APN_AP_HASH,
            confidence: 0.9,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
        Rule {
            name: "apn_label",
            pattern: &*APN_LABELED,
            confidence: 0.9,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
        Rule {
            name: "assessor_parcel_number",
            pattern: &*APN_ASSESSOR_PARCEL,
            confidence: 0.85,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
        Rule {
            name: "parcel_number_label",
            pattern: &*APN_PARCEL_NUMBER,
            confidence: 0.8,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
        Rule {
            name: "bare_4_3_3",
            pattern: &*APN_BARE,
            confidence: 0.6,
            normalize: normalize_parcel_number,
            validate: is_valid_parcel_number,
        },
    ];
}

/// APN field extractor.
pub struct ParcelExtractor;

impl ParcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ParcelExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&PARCEL_RULES, text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(&PARCEL_RULES, text)
    }
}

/// Extract the APN from text, or an empty string.
pub fn extract_parcel_number(text: &str) -> String {
    ParcelExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Drop whitespace and anything that is not a digit or hyphen, then apply
/// the 4-3-3 grouping to an ungrouped 10-digit run.
fn normalize_parcel_number(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    format_parcel_number(&cleaned)
}

fn is_valid_parcel_number(apn: &str) -> bool {
    apn.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PARCEL_DIGITS
}

/// Format a 10-digit APN with dashes (XXXX-XXX-XXX); other shapes are returned unchanged.
pub fn format_parcel_number(apn: &str) -> String {
    if apn.contains('-') || apn.len() != 10 || !apn.chars().all(|c| c.is_ascii_digit()) {
        return apn.to_string();
    }

    format!("{}-{}-{}", &apn[0..4], &apn[4..7], &apn[7..10])
}
