// WHY: classical Latin oracle over a pluggable morphological analyzer
// Any analyzer failure counts as "not recognized"; a single bad token never aborts a batch

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::LexicalOracle;
use crate::error::AnalysisFailure;

/// One morphological reading of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub lemma: String,
    /// Analyzer-specific description, e.g. "us:orum"
    pub detail: String,
}

/// Anything that can propose analyses for a normalized form
pub trait MorphologicalAnalyzer: Send + Sync {
    fn analyze(&self, normalized_form: &str) -> Result<Vec<Analysis>, AnalysisFailure>;
}

pub struct ClassicalOracle {
    analyzer: Arc<dyn MorphologicalAnalyzer>,
    failures: AtomicU64,
}

impl ClassicalOracle {
    pub fn new(analyzer: Arc<dyn MorphologicalAnalyzer>) -> Self {
        Self { analyzer, failures: AtomicU64::new(0) }
    }

    /// True iff the analyzer returns at least one analysis
    pub fn recognized(&self, normalized_form: &str) -> bool {
        !self.analyses(normalized_form).is_empty()
    }

    /// Analyses for a form; a failing analyzer yields none and is counted
    pub fn analyses(&self, normalized_form: &str) -> Vec<Analysis> {
        match self.analyzer.analyze(normalized_form) {
            Ok(analyses) => analyses,
            Err(failure) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                debug!(form = normalized_form, %failure, "analysis failed, treating form as unrecognized");
                Vec::new()
            }
        }
    }

    /// Number of analyzer failures absorbed so far
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl LexicalOracle for ClassicalOracle {
    fn name(&self) -> &str {
        "classical"
    }

    fn attests(&self, normalized_form: &str) -> bool {
        self.recognized(normalized_form)
    }
}
