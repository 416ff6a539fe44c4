// WHY: dotted Roman numerals ("xuiii.", "uii.") are chapter and folio marks, not words
// Matching is a fixed allow-list of observed spellings, not a numeral grammar

use std::collections::HashSet;

use super::normalization::{normalize_form, NormalizedForm};
use crate::config::DEFAULT_NUMERAL_ALLOW_LIST;

pub struct RomanNumeralFilter {
    allowed: HashSet<String>,
}

impl RomanNumeralFilter {
    /// Build from allow-list entries; entries are folded like any token and stored dotted
    pub fn new<S: AsRef<str>>(allow_list: &[S]) -> Self {
        let allowed = allow_list
            .iter()
            .map(|entry| normalize_form(entry.as_ref()))
            .filter(|form| !form.is_empty())
            .map(|form| format!("{form}."))
            .collect();
        Self { allowed }
    }

    /// Check a normalized form with its trailing period restored, e.g. "xuiii."
    pub fn is_dotted_roman_numeral(&self, dotted_form: &str) -> bool {
        self.allowed.contains(dotted_form)
    }

    /// Check a token's normalized form; forms without a trailing period never match
    pub fn matches(&self, normalized: &NormalizedForm) -> bool {
        normalized
            .dotted()
            .is_some_and(|dotted| self.is_dotted_roman_numeral(&dotted))
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl Default for RomanNumeralFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NUMERAL_ALLOW_LIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalization::normalize;

    #[test]
    fn test_observed_forms_match() {
        let filter = RomanNumeralFilter::default();
        for form in ["xuiii.", "uii.", "ui."] {
            assert!(filter.is_dotted_roman_numeral(form), "{form} should be a numeral");
        }
        assert!(!filter.is_dotted_roman_numeral("xuiii"));
        assert!(!filter.is_dotted_roman_numeral("dixit."));
    }

    #[test]
    fn test_surface_spellings_with_v_match_through_normalization() {
        let filter = RomanNumeralFilter::default();
        assert!(filter.matches(&normalize("XVIII.")));
        assert!(filter.matches(&normalize("vii.")));
        assert!(!filter.matches(&normalize("vii")));
        assert!(!filter.matches(&normalize("vii,")));
    }

    #[test]
    fn test_not_a_grammar() {
        // Valid numeral, but never observed: outside the allow-list
        let filter = RomanNumeralFilter::default();
        assert!(!filter.matches(&normalize("mcmxcix.")));
    }

    #[test]
    fn test_custom_allow_list_entries_are_folded() {
        let filter = RomanNumeralFilter::new(&["XVII.", "lv"]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_dotted_roman_numeral("xuii."));
        assert!(filter.is_dotted_roman_numeral("lu."));
    }
}
