//! City extraction.

use lazy_static::lazy_static;

use super::normalize::{collapse_whitespace, title_case_if_upper};
use super::patterns::{
    CITY_BEFORE_STATE, CITY_IN_THE_CITY_OF, CITY_KNOWN, CITY_OF, CITY_WITH_AREA,
};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};

/// Cities recognized by name when no structural pattern matches.
pub const KNOWN_CITIES: [&str; 11] = [
    "Los Angeles",
    "Ventura",
    "Riverside",
    "San Bernardino",
    "Orange",
    "Pasadena",
    "Glendale",
    "Burbank",
    "Santa Monica",
    "Tujunga",
    "Glendora",
];

lazy_static! {
    static ref CITY_RULES: Vec<Rule> = vec![
        Rule {
            name: "city_with_area",
            pattern: &*CITY_WITH_AREA,
            confidence: 0.9,
            normalize: normalize_city,
            validate: is_valid_city,
        },
        Rule {
            name: "city_of",
            pattern: &*CITY_OF,
            confidence: 0.85,
            normalize: normalize_city,
            validate: is_valid_city,
        },
        Rule {
            name: "city_before_state",
            pattern: &*CITY_BEFORE_STATE,
            confidence: 0.8,
            normalize: normalize_city,
            validate: is_valid_city,
        },
        Rule {
            name: "in_the_city_of",
            pattern: &*CITY_IN_THE_CITY_OF,
            confidence: 0.7,
            normalize: normalize_city,
            validate: is_valid_city,
        },
        Rule {
            name: "known_city",
            pattern: &*CITY_KNOWN,
            confidence: 0.5,
            normalize: canonical_known_city,
            validate: is_valid_city,
        },
    ];
}

/// City field extractor.
pub struct CityExtractor;

impl CityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CityExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&CITY_RULES, text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(&CITY_RULES, text)
    }
}

/// Extract the city from text, or an empty string.
pub fn extract_city(text: &str) -> String {
    CityExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn normalize_city(raw: &str) -> String {
    title_case_if_upper(&collapse_whitespace(raw), false)
}

fn canonical_known_city(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    KNOWN_CITIES
        .iter()
        .find(|city| city.eq_ignore_ascii_case(&collapsed))
        .map(|city| city.to_string())
        .unwrap_or_else(|| title_case_if_upper(&collapsed, false))
}

fn is_valid_city(city: &str) -> bool {
    let len = city.chars().count();
    (3..=30).contains(&len) && !city.chars().any(|c| c.is_ascii_digit())
}
