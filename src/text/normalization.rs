// WHY: standalone lookup-key normalization so oracles and detectors agree on one key
// The surface form is never touched; this only derives the key oracles are queried with

use serde::Serialize;

/// Canonical lookup key derived from a surface form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedForm {
    pub form: String,
    /// A '.' directly followed the word before punctuation was stripped
    pub trailing_period: bool,
}

impl NormalizedForm {
    pub fn as_str(&self) -> &str {
        &self.form
    }

    pub fn is_empty(&self) -> bool {
        self.form.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.form.chars().count()
    }

    /// Key with its trailing period restored, as numeral allow-lists spell them
    pub fn dotted(&self) -> Option<String> {
        if self.trailing_period && !self.form.is_empty() {
            Some(format!("{}.", self.form))
        } else {
            None
        }
    }
}

/// Normalize a surface form: lower-case, strip edge punctuation, fold v→u and j→i
pub fn normalize(surface_form: &str) -> NormalizedForm {
    let lowered = surface_form.to_lowercase();
    let without_tail = lowered.trim_end_matches(|c: char| !c.is_alphanumeric());
    let trailing_period = lowered[without_tail.len()..].starts_with('.');
    let core = without_tail.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut form = String::with_capacity(core.len());
    fold_spelling_into(core, &mut form);

    NormalizedForm { form, trailing_period }
}

/// Normalize and keep only the lookup key
pub fn normalize_form(surface_form: &str) -> String {
    normalize(surface_form).form
}

/// Fold the u/v and i/j spellings into the supplied buffer
/// Expects already lower-cased input; the buffer is cleared first.
pub fn fold_spelling_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());
    for ch in text.chars() {
        buffer.push(match ch {
            'v' => 'u',
            'j' => 'i',
            other => other,
        });
    }
}
