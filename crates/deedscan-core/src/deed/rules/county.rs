//! County extraction, restricted to the supported counties.

use lazy_static::lazy_static;

use super::normalize::collapse_whitespace;
use super::patterns::{COUNTY_OF, COUNTY_SUFFIX};
use super::{ExtractionMatch, FieldExtractor, Rule};
use crate::models::record::County;

lazy_static! {
    static ref COUNTY_RULES: Vec<Rule> = vec![
        Rule {
            name: "county_of",
            pattern: &*COUNTY_OF,
            confidence: 0.9,
            normalize: collapse_whitespace,
            validate: is_supported_county,
        },
        Rule {
            name: "county_suffix",
            pattern: &*COUNTY_SUFFIX,
            confidence: 0.85,
            normalize: collapse_whitespace,
            validate: is_supported_county,
        },
    ];
}

/// County field extractor.
pub struct CountyExtractor;

impl CountyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CountyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CountyExtractor {
    type Output = ExtractionMatch<County>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        COUNTY_RULES.iter().find_map(|rule| to_county(rule.apply(text)?))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        COUNTY_RULES
            .iter()
            .filter_map(|rule| to_county(rule.apply(text)?))
            .collect()
    }
}

/// Extract the county, falling back to Los Angeles.
pub fn extract_county(text: &str) -> County {
    CountyExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn to_county(m: ExtractionMatch<String>) -> Option<ExtractionMatch<County>> {
    let county = County::from_name(&m.value)?;
    let mut converted = ExtractionMatch::new(county, m.confidence, m.source).with_rule(m.rule);
    converted.position = m.position;
    Some(converted)
}

fn is_supported_county(name: &str) -> bool {
    County::from_name(name).is_some()
}
