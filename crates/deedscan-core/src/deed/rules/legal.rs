//! Legal description extraction.
//!
//! A deed either carries its legal description inline or points to an
//! attached Exhibit A. An exhibit reference short-circuits the inline rules:
//! the body under the "EXHIBIT A" heading is returned when it can be found,
//! otherwise a pointer string.

use lazy_static::lazy_static;
use regex::Match;
use tracing::debug;

use super::normalize::{char_offset, collapse_whitespace};
use super::patterns::{
    EXHIBIT_A_HEADING, EXHIBIT_A_HEADING_LINE, EXHIBIT_A_LABEL, EXHIBIT_A_REFERENCE, EXHIBIT_B_HEADING,
    GRANT_CLAUSE_PREFIX, LEGAL_DESCRIPTION_LABEL, LEGAL_END_MARKERS, LEGAL_FOLLOWING_DESCRIBED,
    LEGAL_LOT_OR_PARCEL, LEGAL_REAL_PROPERTY, RECEIPT_ACKNOWLEDGED,
};
use super::{ExtractionMatch, FieldExtractor, Rule};
use crate::models::config::ExtractionConfig;

/// Returned when the description lives in an exhibit that is not part of the text.
pub const EXHIBIT_A_FALLBACK: &str = "See Exhibit A attached to original deed";

lazy_static! {
    static ref INLINE_RULES: Vec<Rule> = vec![
        Rule {
            name: "lot_or_parcel",
            pattern: &*LEGAL_LOT_OR_PARCEL,
            confidence: 0.85,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
        Rule {
            name: "following_described",
            pattern: &*LEGAL_FOLLOWING_DESCRIBED,
            confidence: 0.8,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
        Rule {
            name: "real_property",
            pattern: &*LEGAL_REAL_PROPERTY,
            confidence: 0.7,
            normalize: collapse_whitespace,
            validate: is_non_empty,
        },
    ];
}

/// Legal description extractor.
#[derive(Debug, Clone)]
pub struct LegalDescriptionExtractor {
    /// Captures shorter than this many characters are discarded.
    min_len: usize,
    exhibit_char_cap: usize,
    acknowledgment_skip: usize,
}

impl LegalDescriptionExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_len: config.min_legal_description_len,
            exhibit_char_cap: config.exhibit_char_cap,
            acknowledgment_skip: config.acknowledgment_skip,
        }
    }

    fn long_enough(&self, description: &str) -> bool {
        description.chars().count() >= self.min_len
    }

    /// `Some` whenever the text references Exhibit A, even if no body is found.
    fn from_exhibit(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let reference = EXHIBIT_A_REFERENCE.find(text)?;
        debug!("Legal description is referenced to Exhibit A");

        Some(self.exhibit_body(text).unwrap_or_else(|| {
            ExtractionMatch::new(EXHIBIT_A_FALLBACK.to_string(), 0.5, reference.as_str())
                .with_position(reference.start(), reference.end())
                .with_rule("exhibit_a_reference")
        }))
    }

    fn exhibit_body(&self, text: &str) -> Option<ExtractionMatch<String>> {
        // A heading inside a reference ("ATTACHED AS EXHIBIT A") is not the heading
        let references: Vec<Match<'_>> = EXHIBIT_A_REFERENCE.find_iter(text).collect();
        let outside_references = |m: &Match<'_>| {
            references.iter().all(|r| m.end() <= r.start() || m.start() >= r.end())
        };
        // Any case at the start of a line, otherwise an all-caps heading anywhere
        let heading = EXHIBIT_A_HEADING_LINE
            .find_iter(text)
            .find(|m| outside_references(m))
            .or_else(|| EXHIBIT_A_HEADING.find_iter(text).find(|m| outside_references(m)))?;

        let section = &text[heading.start()..];
        let end = EXHIBIT_B_HEADING
            .find_at(section, heading.end() - heading.start())
            .map(|m| m.start())
            .unwrap_or_else(|| char_offset(section, self.exhibit_char_cap));
        let raw = &section[..end];

        let body = EXHIBIT_A_LABEL.replace(raw, "");
        let body = LEGAL_DESCRIPTION_LABEL.replace(&body, "");
        let body = collapse_whitespace(&body);

        if !self.long_enough(&body) {
            debug!("Exhibit A body too short ({} chars)", body.chars().count());
            return None;
        }

        Some(
            ExtractionMatch::new(body, 0.9, raw)
                .with_position(heading.start(), heading.start() + end)
                .with_rule("exhibit_a_body"),
        )
    }

    fn inline(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        let mut candidates: Vec<_> = INLINE_RULES
            .iter()
            .filter_map(|rule| rule.apply(text))
            .filter(|m| self.long_enough(&m.value))
            .collect();
        candidates.extend(self.after_acknowledgment(text));
        candidates
    }

    /// Positional fallback: skip the grantee clause after the receipt
    /// acknowledgment and read up to the nearest terminator.
    fn after_acknowledgment(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let ack = RECEIPT_ACKNOWLEDGED.find(text)?;
        let tail = &text[ack.start()..];

        let end = LEGAL_END_MARKERS
            .iter()
            .filter_map(|(pattern, _)| pattern.find(tail).map(|m| m.start()))
            .min()?;
        let start = char_offset(tail, self.acknowledgment_skip);
        if start >= end {
            return None;
        }

        let raw = &tail[start..end];
        let trimmed = raw.trim_start_matches(|c: char| !c.is_ascii_uppercase());
        let without_clause = GRANT_CLAUSE_PREFIX.replace(trimmed, "");
        let description = collapse_whitespace(&without_clause);

        if !self.long_enough(&description) {
            return None;
        }

        Some(
            ExtractionMatch::new(description, 0.5, raw)
                .with_position(ack.start() + start, ack.start() + end)
                .with_rule("after_acknowledgment"),
        )
    }
}

impl Default for LegalDescriptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LegalDescriptionExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(exhibit) = self.from_exhibit(text) {
            return Some(exhibit);
        }

        INLINE_RULES
            .iter()
            .filter_map(|rule| rule.apply(text))
            .find(|m| self.long_enough(&m.value))
            .or_else(|| self.after_acknowledgment(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        match self.from_exhibit(text) {
            Some(exhibit) => vec![exhibit],
            None => self.inline(text),
        }
    }
}

/// Extract the legal description with default thresholds, or an empty string.
pub fn extract_legal_description(text: &str) -> String {
    LegalDescriptionExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn is_non_empty(value: &str) -> bool {
    !value.is_empty()
}
