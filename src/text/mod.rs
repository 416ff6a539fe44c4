// Text-side preparation: hyphenation repair, tokenization, normalization and numeral filtering
// Everything here is pure and independent of the lexical resources

pub mod hyphenation;
pub mod normalization;
pub mod numerals;

use serde::Serialize;

pub use hyphenation::{HyphenationMerger, MergeOutcome};
pub use normalization::{normalize, normalize_form, NormalizedForm};
pub use numerals::RomanNumeralFilter;

/// 0-based location of a token within the merged lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line_index: usize,
    pub word_index: usize,
}

/// A word as it appears in the source, with its derived lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    surface_form: String,
    normalized: NormalizedForm,
    position: Position,
}

impl Token {
    pub fn new(surface_form: impl Into<String>, position: Position) -> Self {
        let surface_form = surface_form.into();
        let normalized = normalize(&surface_form);
        Self { surface_form, normalized, position }
    }

    pub fn surface_form(&self) -> &str {
        &self.surface_form
    }

    pub fn normalized_form(&self) -> &str {
        self.normalized.as_str()
    }

    pub fn normalized(&self) -> &NormalizedForm {
        &self.normalized
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Split one merged line into tokens; chunks that are pure punctuation are dropped
pub fn tokenize_line(line_index: usize, line: &str) -> Vec<Token> {
    line.split_whitespace()
        .filter(|chunk| !normalize(chunk).is_empty())
        .enumerate()
        .map(|(word_index, chunk)| Token::new(chunk, Position { line_index, word_index }))
        .collect()
}

/// Tokenize every line in document order
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Vec<Token> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(line_index, line)| tokenize_line(line_index, line.as_ref()))
        .collect()
}
