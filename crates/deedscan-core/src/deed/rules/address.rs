//! Property address extraction.

use lazy_static::lazy_static;

use super::city::CityExtractor;
use super::normalize::collapse_whitespace;
use super::patterns::{ADDRESS_COMMONLY_KNOWN, ADDRESS_FULL, ADDRESS_WITH_AREA, STREET_FRAGMENT, ZIP_CODE};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};

const STATE_ABBREVIATION: &str = "CA";

lazy_static! {
    static ref ADDRESS_RULES: Vec<Rule> = vec![
        Rule {
            name: "commonly_known_as",
            pattern: &*ADDRESS_COMMONLY_KNOWN,
            confidence: 0.95,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
        Rule {
            name: "street_city_area_zip",
            pattern: &*ADDRESS_WITH_AREA,
            confidence: 0.9,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
        Rule {
            name: "street_city_zip",
            pattern: &*ADDRESS_FULL,
            confidence: 0.85,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
    ];
}

/// Property address extractor.
///
/// When no complete address is present, a bare street fragment is completed
/// with the separately extracted city and the first free-standing zip code.
pub struct AddressExtractor {
    city: CityExtractor,
}

impl AddressExtractor {
    pub fn new() -> Self {
        Self {
            city: CityExtractor::new(),
        }
    }

    fn compose_from_fragment(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = STREET_FRAGMENT.captures(text)?;
        let street = caps.get(1)?;
        let street_text = collapse_whitespace(street.as_str());

        let city = self.city.extract(text).map(|m| m.value).unwrap_or_default();
        if city.is_empty() {
            return Some(
                ExtractionMatch::new(street_text, 0.4, street.as_str())
                    .with_position(street.start(), street.end())
                    .with_rule("street_fragment"),
            );
        }

        // The street number itself may be five digits long
        let zip = ZIP_CODE
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .find(|m| m.start() >= street.end() || m.end() <= street.start())
            .map(|m| m.as_str());

        let value = match zip {
            Some(zip) => format!("{}, {}, {} {}", street_text, city, STATE_ABBREVIATION, zip),
            None => format!("{}, {}, {}", street_text, city, STATE_ABBREVIATION),
        };

        Some(
            ExtractionMatch::new(value, 0.5, street.as_str())
                .with_position(street.start(), street.end())
                .with_rule("street_fragment_composed"),
        )
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&ADDRESS_RULES, text).or_else(|| self.compose_from_fragment(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut candidates = all_matches(&ADDRESS_RULES, text);
        candidates.extend(self.compose_from_fragment(text));
        candidates
    }
}

/// Extract the property address from text, or an empty string.
pub fn extract_property_address(text: &str) -> String {
    AddressExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn is_non_empty(value: &str) -> bool {
    !value.is_empty()
}
