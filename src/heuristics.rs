// WHY: weak lexical signals for medieval forms no lexicon attests
// Each detector has a bool query plus a `matching_*` variant naming what fired, for score breakdowns

use std::collections::HashSet;

use crate::config::{ScoringConfig, VariantClass};
use crate::lexicon::OracleSet;
use crate::text::normalize_form;

pub struct HeuristicDetectors {
    /// Longest first, so breakdowns name the most specific suffix
    suffixes: Vec<String>,
    vocabulary: HashSet<String>,
    variant_classes: Vec<VariantClass>,
}

impl HeuristicDetectors {
    pub fn new<S: AsRef<str>>(suffixes: &[S], vocabulary: &[S], variant_classes: &[VariantClass]) -> Self {
        let mut suffixes: Vec<String> = suffixes
            .iter()
            .map(|s| normalize_form(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        suffixes.dedup();

        let vocabulary = vocabulary
            .iter()
            .map(|w| normalize_form(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();

        let variant_classes = variant_classes
            .iter()
            .map(|class| VariantClass::new(&normalize_form(&class.from), &normalize_form(&class.to)))
            .filter(|class| !class.from.is_empty() && !class.to.is_empty() && class.from != class.to)
            .collect();

        Self { suffixes, vocabulary, variant_classes }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.productive_suffixes.as_slice(),
            config.ecclesiastical_vocabulary.as_slice(),
            &config.variant_classes,
        )
    }

    /// Suffix the form ends with, if any
    pub fn matching_suffix(&self, normalized_form: &str) -> Option<&str> {
        self.suffixes
            .iter()
            .find(|suffix| normalized_form.ends_with(suffix.as_str()))
            .map(String::as_str)
    }

    pub fn has_productive_suffix(&self, normalized_form: &str) -> bool {
        self.matching_suffix(normalized_form).is_some()
    }

    /// First neighbor in the window that belongs to the ecclesiastical vocabulary
    pub fn matching_context<'w, S: AsRef<str>>(&self, window: &'w [S]) -> Option<&'w str> {
        window
            .iter()
            .map(AsRef::as_ref)
            .find(|neighbor| self.vocabulary.contains(*neighbor))
    }

    pub fn has_ecclesiastical_context<S: AsRef<str>>(&self, window: &[S]) -> bool {
        self.matching_context(window).is_some()
    }

    /// First single-substitution spelling variant attested by any oracle
    pub fn matching_variant(&self, normalized_form: &str, oracles: &OracleSet) -> Option<String> {
        self.variant_candidates(normalized_form)
            .into_iter()
            .find(|candidate| oracles.any_attests(candidate))
    }

    pub fn has_orthographic_variant(&self, normalized_form: &str, oracles: &OracleSet) -> bool {
        self.matching_variant(normalized_form, oracles).is_some()
    }

    /// All forms reachable by exactly one substitution from one equivalence class
    pub fn variant_candidates(&self, normalized_form: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        for class in &self.variant_classes {
            single_substitutions(normalized_form, &class.from, &class.to, &mut candidates);
            single_substitutions(normalized_form, &class.to, &class.from, &mut candidates);
        }
        candidates.retain(|candidate| candidate != normalized_form);
        let mut seen = HashSet::new();
        candidates.retain(|candidate| seen.insert(candidate.clone()));
        candidates
    }
}

/// Replace each occurrence of `pattern` with `replacement`, one occurrence per candidate
/// Occurrences lying inside an existing `replacement` are left alone ("ae" never becomes "aae").
fn single_substitutions(form: &str, pattern: &str, replacement: &str, out: &mut Vec<String>) {
    for (at, _) in form.match_indices(pattern) {
        if inside_replacement(form, at, pattern, replacement) {
            continue;
        }
        let mut candidate = String::with_capacity(form.len() + replacement.len());
        candidate.push_str(&form[..at]);
        candidate.push_str(replacement);
        candidate.push_str(&form[at + pattern.len()..]);
        out.push(candidate);
    }
}

/// `at - offset` may land inside a multi-byte character (the `ñ` of "dñe"); `get` rejects those.
fn inside_replacement(form: &str, at: usize, pattern: &str, replacement: &str) -> bool {
    replacement.match_indices(pattern).any(|(offset, _)| {
        at.checked_sub(offset)
            .and_then(|start| form.get(start..))
            .is_some_and(|rest| rest.starts_with(replacement))
    })
}
