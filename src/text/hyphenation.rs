// WHY: words broken across a manuscript line boundary must be rejoined before lookup
// Runs on raw lines before tokenization; unmerged lines pass through verbatim

use regex_automata::{meta::Regex, Input};
use tracing::debug;

use crate::config::DEFAULT_HYPHEN_MARKS;
use crate::error::ConfigError;

/// Lines after merging plus the number of joins performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub lines: Vec<String>,
    pub merges: usize,
}

/// Line-break hyphenation merger
pub struct HyphenationMerger {
    /// Matches a letter immediately followed by a hyphen mark at line end
    line_end: Regex,
}

impl HyphenationMerger {
    /// Build a merger recognizing the given hyphen marks
    pub fn new(marks: &[char]) -> Result<Self, ConfigError> {
        if marks.is_empty() {
            return Err(ConfigError::Invalid("at least one hyphen mark is required".to_string()));
        }
        let class: String = marks.iter().map(|c| format!("\\x{{{:X}}}", *c as u32)).collect();
        let pattern = format!(r"\p{{Alphabetic}}[{class}]\s*$");
        let line_end = Regex::new(&pattern)
            .map_err(|e| ConfigError::Invalid(format!("hyphen pattern {pattern:?}: {e}")))?;
        Ok(Self { line_end })
    }

    pub fn with_default_marks() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_HYPHEN_MARKS)
    }

    /// Merge hyphenated line breaks, returning only the lines
    pub fn merge<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        self.merge_with_count(lines).lines
    }

    /// Merge hyphenated line breaks and report how many joins were made
    pub fn merge_with_count<S: AsRef<str>>(&self, lines: &[S]) -> MergeOutcome {
        let mut merged = Vec::with_capacity(lines.len());
        let mut merges = 0;
        let mut index = 0;

        while index < lines.len() {
            let mut current = lines[index].as_ref().to_string();
            let mut next = index + 1;

            // Chains like "a-" / "b-" / "c" keep joining while the result still ends in a break
            while let Some(cut) = self.hyphen_position(&current) {
                let Some(following) = lines.get(next) else {
                    break;
                };
                let Some((fragment, rest)) = continuation(following.as_ref()) else {
                    debug!(line = index, "hyphen kept literal: continuation does not start a word");
                    break;
                };

                current.truncate(cut);
                current.push_str(fragment);
                if !rest.is_empty() {
                    current.push(' ');
                    current.push_str(rest);
                }
                merges += 1;
                next += 1;
            }

            merged.push(current);
            index = next;
        }

        MergeOutcome { lines: merged, merges }
    }

    /// Byte offset of the hyphen mark if the line ends in an attached one
    fn hyphen_position(&self, line: &str) -> Option<usize> {
        let found = self.line_end.find(Input::new(line))?;
        let letter = line[found.start()..].chars().next()?;
        Some(found.start() + letter.len_utf8())
    }
}

/// First fragment of the next line and the remainder, if it can continue a word
/// Empty lines and fragments opening with a capital or punctuation do not qualify.
fn continuation(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;
    if !first.is_alphabetic() || first.is_uppercase() {
        return None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((fragment, rest)) => Some((fragment, rest.trim_start())),
        None => Some((trimmed, "")),
    }
}
