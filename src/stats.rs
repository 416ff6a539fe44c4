// WHY: per-tier counts built incrementally while a document is scored
// The builder is consumed by `finish`, so a snapshot can no longer change

use serde::{Deserialize, Serialize};

use crate::scoring::Classification;

/// Immutable summary of one document or a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    /// Tokens that were scored and classified
    pub total_tokens: u64,
    pub valid: u64,
    pub review: u64,
    pub suspect: u64,
    pub skipped_numerals: u64,
    pub skipped_short: u64,
    /// Merged lines that produced no tokens
    pub empty_lines: u64,
    pub hyphenation_merges: u64,
}

impl CorpusStatistics {
    pub fn count(&self, tier: Classification) -> u64 {
        match tier {
            Classification::Valid => self.valid,
            Classification::Review => self.review,
            Classification::Suspect => self.suspect,
        }
    }

    /// Share of scored tokens in a tier, 0.0 when nothing was scored
    pub fn percentage(&self, tier: Classification) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        self.count(tier) as f64 * 100.0 / self.total_tokens as f64
    }

    /// Sum two snapshots, e.g. for run totals across documents
    pub fn combine(&self, other: &CorpusStatistics) -> CorpusStatistics {
        CorpusStatistics {
            total_tokens: self.total_tokens + other.total_tokens,
            valid: self.valid + other.valid,
            review: self.review + other.review,
            suspect: self.suspect + other.suspect,
            skipped_numerals: self.skipped_numerals + other.skipped_numerals,
            skipped_short: self.skipped_short + other.skipped_short,
            empty_lines: self.empty_lines + other.empty_lines,
            hyphenation_merges: self.hyphenation_merges + other.hyphenation_merges,
        }
    }
}

#[derive(Debug, Default)]
pub struct StatisticsBuilder {
    stats: CorpusStatistics,
}

impl StatisticsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tier: Classification) {
        self.stats.total_tokens += 1;
        match tier {
            Classification::Valid => self.stats.valid += 1,
            Classification::Review => self.stats.review += 1,
            Classification::Suspect => self.stats.suspect += 1,
        }
    }

    pub fn record_numeral(&mut self) {
        self.stats.skipped_numerals += 1;
    }

    pub fn record_short(&mut self) {
        self.stats.skipped_short += 1;
    }

    pub fn record_empty_line(&mut self) {
        self.stats.empty_lines += 1;
    }

    pub fn record_merges(&mut self, merges: usize) {
        self.stats.hyphenation_merges += merges as u64;
    }

    pub fn finish(self) -> CorpusStatistics {
        self.stats
    }
}
