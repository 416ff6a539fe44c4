// WHY: one place for every weight, threshold and closed word list the scorer consults
// Loaded from TOML with serde defaults so a partial file only overrides what it names

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Score contributions for each positive signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub classical: i32,
    pub medieval: i32,
    pub productive_suffix: i32,
    pub ecclesiastical_context: i32,
    pub orthographic_variant: i32,
}

/// Upper bound for any single signal weight; weights below zero are rejected too
pub const MAX_WEIGHT: i32 = 100;

impl SignalWeights {
    fn named(&self) -> [(&'static str, i32); 5] {
        [
            ("classical", self.classical),
            ("medieval", self.medieval),
            ("productive_suffix", self.productive_suffix),
            ("ecclesiastical_context", self.ecclesiastical_context),
            ("orthographic_variant", self.orthographic_variant),
        ]
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            classical: 30,
            medieval: 40,
            productive_suffix: 10,
            ecclesiastical_context: 5,
            orthographic_variant: 10,
        }
    }
}

/// Tier boundaries; both are inclusive lower bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub valid: u8,
    pub review: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { valid: 75, review: 40 }
    }
}

/// Bidirectional spelling equivalence, e.g. `ae` <-> `e`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantClass {
    pub from: String,
    pub to: String,
}

impl VariantClass {
    pub fn new(from: &str, to: &str) -> Self {
        Self { from: from.to_string(), to: to.to_string() }
    }
}

pub const DEFAULT_PRODUCTIVE_SUFFIXES: &[&str] = &[
    "arius", "aria", "arium",
    "atio", "ationis",
    "tor", "toris",
    "torium", "torii",
    "mentum", "menti",
    "itia", "itiae",
];

pub const DEFAULT_ECCLESIASTICAL_VOCABULARY: &[&str] = &[
    "abbas", "abbatia", "abbatissa", "archiepiscopus", "basilica",
    "canonicus", "capitulum", "cardinalis", "clericus", "diaconus",
    "diocesis", "dominus", "ecclesia", "episcopus", "monasterium",
    "monachus", "parochia", "presbyter", "sacerdos", "sanctus",
];

/// Dotted numerals observed in the manuscripts, already in u/i-folded spelling
pub const DEFAULT_NUMERAL_ALLOW_LIST: &[&str] = &[
    "i.", "ii.", "iii.", "iiii.", "iu.", "u.", "ui.", "uii.", "uiii.", "ix.",
    "x.", "xi.", "xii.", "xiii.", "xiiii.", "xiu.", "xu.", "xui.", "xuii.", "xuiii.",
    "xix.", "xx.", "xxx.", "xl.", "l.", "c.", "m.",
];

pub const DEFAULT_HYPHEN_MARKS: &[char] = &['-', '\u{2E17}', '\u{00AC}', '='];

/// All tunable constants of the scoring pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: i32,
    pub weights: SignalWeights,
    pub thresholds: Thresholds,
    pub productive_suffixes: Vec<String>,
    pub ecclesiastical_vocabulary: Vec<String>,
    /// Neighbors considered on each side of a token, within its line
    pub context_window: usize,
    pub numeral_allow_list: Vec<String>,
    pub variant_classes: Vec<VariantClass>,
    pub hyphen_marks: Vec<char>,
    /// Tokens with fewer normalized characters are skipped, not scored
    pub min_token_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            weights: SignalWeights::default(),
            thresholds: Thresholds::default(),
            productive_suffixes: to_owned(DEFAULT_PRODUCTIVE_SUFFIXES),
            ecclesiastical_vocabulary: to_owned(DEFAULT_ECCLESIASTICAL_VOCABULARY),
            context_window: 3,
            numeral_allow_list: to_owned(DEFAULT_NUMERAL_ALLOW_LIST),
            variant_classes: vec![VariantClass::new("ae", "e"), VariantClass::new("ti", "ci")],
            hyphen_marks: DEFAULT_HYPHEN_MARKS.to_vec(),
            min_token_chars: 2,
        }
    }
}

impl ScoringConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations the classifier or merger cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Thresholds { valid, review } = self.thresholds;
        if valid > 100 || review > 100 {
            return Err(ConfigError::Invalid(format!(
                "thresholds must lie in 0..=100 (valid={valid}, review={review})"
            )));
        }
        if review > valid {
            return Err(ConfigError::Invalid(format!(
                "review threshold {review} is above valid threshold {valid}"
            )));
        }
        if !(0..=100).contains(&self.base_score) {
            return Err(ConfigError::Invalid(format!(
                "base score {} outside 0..=100",
                self.base_score
            )));
        }
        if let Some((name, weight)) = self
            .weights
            .named()
            .into_iter()
            .find(|(_, weight)| !(0..=MAX_WEIGHT).contains(weight))
        {
            return Err(ConfigError::Invalid(format!(
                "weight {name} = {weight} outside 0..={MAX_WEIGHT}"
            )));
        }
        if self.hyphen_marks.iter().any(|c| c.is_alphanumeric() || c.is_whitespace()) {
            return Err(ConfigError::Invalid(
                "hyphen marks must be punctuation characters".to_string(),
            ));
        }
        if let Some(class) = self
            .variant_classes
            .iter()
            .find(|class| class.from.is_empty() || class.to.is_empty() || class.from == class.to)
        {
            return Err(ConfigError::Invalid(format!(
                "variant class {:?} <-> {:?} must pair two distinct non-empty spellings",
                class.from, class.to
            )));
        }
        if self.productive_suffixes.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Invalid("productive suffixes must be non-empty".to_string()));
        }
        Ok(())
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
