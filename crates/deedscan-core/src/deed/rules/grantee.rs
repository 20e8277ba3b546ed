//! Grantee extraction and the grantee-to-grantor role inversion.
//!
//! The deed being scanned is the one that put the current owner on title, so
//! the party we need is its *grantee*. In the trust transfer deed that same
//! person conveys the property into the trust and therefore becomes the
//! *grantor*.

use lazy_static::lazy_static;
use tracing::debug;

use super::normalize::{clean_name, token_count};
use super::patterns::{
    GRANTEE_CONVEYS_TO, GRANTEE_HEREBY_GRANTS, GRANTEE_LABEL, GRANTEE_MAIL_TO, GRANTEE_MARITAL,
};
use super::{all_matches, first_match, ExtractionMatch, FieldExtractor, Rule};

/// Accepted token counts for a person's name.
const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 5;

lazy_static! {
    static ref GRANTEE_RULES: Vec<Rule> = vec![
        Rule {
            name: "when_recorded_mail_to",
            pattern: &*GRANTEE_MAIL_TO,
            confidence: 0.9,
            normalize: clean_name,
            validate: is_plausible_name,
        },
        Rule {
            name: "hereby_grants_to",
            pattern: &*GRANTEE_HEREBY_GRANTS,
            confidence: 0.9,
            normalize: clean_name,
            validate: is_plausible_name,
        },
        Rule {
            name: "grantee_label",
            pattern: &*GRANTEE_LABEL,
            confidence: 0.85,
            normalize: clean_name,
            validate: is_plausible_name,
        },
        Rule {
            name: "conveys_to",
            pattern: &*GRANTEE_CONVEYS_TO,
            confidence: 0.7,
            normalize: clean_name,
            validate: is_plausible_name,
        },
        Rule {
            name: "marital_status",
            pattern: &*GRANTEE_MARITAL,
            confidence: 0.6,
            normalize: clean_name,
            validate: is_plausible_name,
        },
    ];
}

/// Grantee field extractor.
pub struct GranteeExtractor;

impl GranteeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GranteeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GranteeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&GRANTEE_RULES, text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        all_matches(&GRANTEE_RULES, text)
    }
}

/// Extract the grantee named in the recorded deed.
pub fn extract_grantee(text: &str) -> Option<ExtractionMatch<String>> {
    GranteeExtractor::new().extract(text)
}

/// The grantee of the recorded deed is the grantor of the trust transfer deed.
pub fn grantee_becomes_grantor(original_grantee: Option<&ExtractionMatch<String>>) -> String {
    match original_grantee {
        Some(grantee) => {
            debug!("Grantee {:?} becomes the grantor (rule {})", grantee.value, grantee.rule);
            grantee.value.clone()
        }
        None => String::new(),
    }
}

fn is_plausible_name(name: &str) -> bool {
    (MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&token_count(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grantee(text: &str) -> String {
        extract_grantee(text).map(|m| m.value).unwrap_or_default()
    }

    #[test]
    fn test_hereby_grants_to() {
        let text = "FOR A VALUABLE CONSIDERATION, receipt of which is hereby acknowledged, \
                    JOHN SELLER hereby GRANT(S) to CANDACE D. ROY, a married woman as her sole and separate property";
        let m = extract_grantee(text).unwrap();
        assert_eq!(m.value, "Candace D. Roy");
        assert_eq!(m.rule, "hereby_grants_to");
    }

    #[test]
    fn test_when_recorded_mail_to_wins() {
        let text = "RECORDING REQUESTED BY\nFIRST AMERICAN TITLE\nWHEN RECORDED MAIL TO:\nCANDACE D. ROY\n6821 SAINT ESTABAN STREET\n\
                    hereby GRANT(S) to SOMEONE ELSE ENTIRELY, a single man";
        let m = extract_grantee(text).unwrap();
        assert_eq!(m.value, "Candace D. Roy");
        assert_eq!(m.rule, "when_recorded_mail_to");
    }

    #[test]
    fn test_grantee_label() {
        assert_eq!(grantee("GRANTOR: ACME LLC\nGRANTEE: MARIA LOPEZ GARCIA, a widow\n"), "Maria Lopez Garcia");
    }

    #[test]
    fn test_mixed_case_conveys_to() {
        assert_eq!(grantee("does hereby convey to Robert J. Fields, an unmarried man"), "Robert J. Fields");
    }

    #[test]
    fn test_marital_status_fallback() {
        assert_eq!(grantee("vested in Helen M. Park, a single woman"), "Helen M. Park");
    }

    #[test]
    fn test_hereby_grants_to_mixed_case_name() {
        assert_eq!(grantee("Hereby grants to Candace D. Roy, a married woman"), "Candace D. Roy");
    }

    #[test]
    fn test_hereby_grants_to_lowercase_prose_rejected() {
        let text = "The undersigned hereby GRANT(S) to the grantee named below, and more";
        assert!(extract_grantee(text).is_none());
    }

    #[test]
    fn test_single_token_rejected() {
        assert_eq!(grantee("hereby GRANT(S) to ROY, a married woman"), "");
    }

    #[test]
    fn test_too_many_tokens_rejected() {
        assert_eq!(grantee("GRANTEE: ONE TWO THREE FOUR FIVE SIX\n"), "");
    }

    #[test]
    fn test_role_inversion() {
        let m = extract_grantee("hereby GRANT(S) to CANDACE D. ROY, a married woman");
        assert_eq!(grantee_becomes_grantor(m.as_ref()), "Candace D. Roy");
        assert_eq!(grantee_becomes_grantor(None), "");
    }
}
