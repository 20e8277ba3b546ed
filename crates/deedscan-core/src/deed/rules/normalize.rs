//! String normalization shared by the field rules.

use super::patterns::{TRAILING_ARTICLE_CLAUSE, TRAILING_AS_CLAUSE, TRAILING_MARITAL_CLAUSE};

/// Collapse every run of whitespace (including line breaks) into one space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the string has no lowercase letters, the way OCR renders
/// typed deed text.
pub fn is_all_caps(s: &str) -> bool {
    s == s.to_uppercase()
}

/// Uppercase the first character and lowercase the rest.
pub fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Title-case an all-caps string word by word; mixed-case input is returned as is.
///
/// With `keep_initials`, words of at most two characters or ending in a
/// period ("D.", "JR") are left verbatim.
pub fn title_case_if_upper(s: &str, keep_initials: bool) -> String {
    if !is_all_caps(s) {
        return s.to_string();
    }

    s.split(' ')
        .map(|word| {
            if keep_initials && (word.chars().count() <= 2 || word.ends_with('.')) {
                word.to_string()
            } else {
                title_case_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove ", a married woman", " as joint tenants" and similar trailing
/// descriptions from a captured name.
pub fn strip_trailing_clause(name: &str) -> String {
    let name = TRAILING_ARTICLE_CLAUSE.replace(name, "");
    let name = TRAILING_AS_CLAUSE.replace(&name, "");
    let name = TRAILING_MARITAL_CLAUSE.replace(&name, "");
    name.trim_end_matches([',', ' ']).to_string()
}

/// Full clean-up for a captured person name.
pub fn clean_name(raw: &str) -> String {
    let stripped = strip_trailing_clause(raw);
    let collapsed = collapse_whitespace(&stripped);
    title_case_if_upper(&collapsed, true)
}

/// Count of whitespace-separated tokens.
pub fn token_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Byte index of the `n`th character, or the string length when shorter.
pub fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  LOT 14\n  OF\tTRACT  "), "LOT 14 OF TRACT");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_title_case_keeps_initials() {
        assert_eq!(title_case_if_upper("CANDACE D. ROY", true), "Candace D. Roy");
        assert_eq!(title_case_if_upper("JOHN Q SMITH JR", true), "John Q Smith JR");
        assert_eq!(title_case_if_upper("Candace D. Roy", true), "Candace D. Roy");
    }

    #[test]
    fn test_title_case_all_words() {
        assert_eq!(title_case_if_upper("SAN BERNARDINO", false), "San Bernardino");
        assert_eq!(title_case_if_upper("LA", false), "La");
    }

    #[test]
    fn test_strip_trailing_clause() {
        assert_eq!(strip_trailing_clause("CANDACE D. ROY, a married woman"), "CANDACE D. ROY");
        assert_eq!(strip_trailing_clause("JOHN SMITH as his sole property"), "JOHN SMITH");
        assert_eq!(strip_trailing_clause("JOHN SMITH A SINGLE MAN"), "JOHN SMITH");
        assert_eq!(strip_trailing_clause("THOMAS ASHBY"), "THOMAS ASHBY");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("CANDACE   D. ROY, a married woman"), "Candace D. Roy");
    }

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("héllo", 2), 3);
        assert_eq!(char_offset("abc", 10), 3);
    }
}
