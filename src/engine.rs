// WHY: single entry point turning document lines into ordered scored tokens and statistics
// Oracles are injected at construction and shared read-only; scoring a document keeps no state

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ScoringConfig;
use crate::error::ConfigError;
use crate::heuristics::HeuristicDetectors;
use crate::lexicon::{ClassicalOracle, LexicalOracle, MedievalOracle, OracleSet};
use crate::scoring::{classify, Classification, ScoreBreakdown, Scorer};
use crate::stats::{CorpusStatistics, StatisticsBuilder};
use crate::text::{tokenize_line, HyphenationMerger, Position, RomanNumeralFilter, Token};

pub const CLASSICAL_LABEL: &str = "classical";
pub const MEDIEVAL_LABEL: &str = "medieval";

/// One classified token of the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredToken {
    pub surface_form: String,
    pub normalized_form: String,
    pub position: Position,
    pub score: u8,
    pub classification: Classification,
    pub breakdown: ScoreBreakdown,
}

/// Everything produced for a single document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    /// Lines after hyphenation merging; token positions index into these
    pub lines: Vec<String>,
    pub tokens: Vec<ScoredToken>,
    pub statistics: CorpusStatistics,
}

pub struct ValidationEngine {
    config: ScoringConfig,
    merger: HyphenationMerger,
    numerals: RomanNumeralFilter,
    detectors: HeuristicDetectors,
    scorer: Scorer,
    oracles: OracleSet,
    classical: Arc<ClassicalOracle>,
}

impl ValidationEngine {
    /// Wire the engine; both oracles are registered with their configured weights
    pub fn new(
        config: ScoringConfig,
        classical: Arc<ClassicalOracle>,
        medieval: Arc<MedievalOracle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let oracles = OracleSet::new()
            .with(CLASSICAL_LABEL, config.weights.classical, classical.clone())
            .with(MEDIEVAL_LABEL, config.weights.medieval, medieval);

        let engine = Self {
            merger: HyphenationMerger::new(&config.hyphen_marks)?,
            numerals: RomanNumeralFilter::new(config.numeral_allow_list.as_slice()),
            detectors: HeuristicDetectors::from_config(&config),
            scorer: Scorer::from_config(&config),
            oracles,
            classical,
            config,
        };
        info!(
            oracles = engine.oracles.len(),
            numerals = engine.numerals.len(),
            "Validation engine ready"
        );
        Ok(engine)
    }

    /// Register an additional lexicon; it contributes `weight` (clamped to 0..=100) whenever it attests a form
    pub fn with_oracle(mut self, label: impl Into<String>, weight: i32, oracle: Arc<dyn LexicalOracle>) -> Self {
        self.oracles.register(label, weight, oracle);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleSet {
        &self.oracles
    }

    /// Classical analyzer failures absorbed since construction
    pub fn analysis_failures(&self) -> u64 {
        self.classical.failures()
    }

    /// Score a single token against its neighbor window
    pub fn score_token<S: AsRef<str>>(&self, token: &Token, window: &[S]) -> ScoredToken {
        let breakdown = self.scorer.score(token, &self.oracles, &self.detectors, window);
        let score = breakdown.final_score();
        ScoredToken {
            surface_form: token.surface_form().to_string(),
            normalized_form: token.normalized_form().to_string(),
            position: token.position(),
            score,
            classification: classify(score, &self.config.thresholds),
            breakdown,
        }
    }

    /// Merge, tokenize, filter, score and classify one document in order
    pub fn score_document<S: AsRef<str>>(&self, lines: &[S]) -> DocumentAnalysis {
        let merged = self.merger.merge_with_count(lines);
        let mut stats = StatisticsBuilder::new();
        stats.record_merges(merged.merges);

        let mut scored = Vec::new();
        for (line_index, line) in merged.lines.iter().enumerate() {
            let tokens = tokenize_line(line_index, line);
            if tokens.is_empty() {
                debug!(line_index, "line yields no tokens");
                stats.record_empty_line();
                continue;
            }

            for (index, token) in tokens.iter().enumerate() {
                if self.numerals.matches(token.normalized()) {
                    stats.record_numeral();
                    continue;
                }
                if token.normalized().char_count() < self.config.min_token_chars {
                    stats.record_short();
                    continue;
                }

                let window = neighbor_window(&tokens, index, self.config.context_window);
                let result = self.score_token(token, &window);
                stats.record(result.classification);
                scored.push(result);
            }
        }

        let statistics = stats.finish();
        debug!(
            tokens = statistics.total_tokens,
            valid = statistics.valid,
            review = statistics.review,
            suspect = statistics.suspect,
            "Document scored"
        );
        DocumentAnalysis { lines: merged.lines, tokens: scored, statistics }
    }
}

/// Normalized forms of up to `radius` tokens on each side, the token itself excluded
fn neighbor_window(tokens: &[Token], index: usize, radius: usize) -> Vec<&str> {
    let start = index.saturating_sub(radius);
    let end = index.saturating_add(radius).saturating_add(1).min(tokens.len());
    (start..end)
        .filter(|&i| i != index)
        .map(|i| tokens[i].normalized_form())
        .collect()
}
