pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod incremental;
pub mod lexicon;
pub mod reader;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod text;

// Re-export main types for convenient access
pub use config::{ScoringConfig, SignalWeights, Thresholds, VariantClass};
pub use engine::{DocumentAnalysis, ScoredToken, ValidationEngine};
pub use error::{AnalysisFailure, ConfigError, ResourceLoadError};
pub use lexicon::{
    Analysis, ClassicalOracle, LexicalOracle, MedievalOracle, MorphologicalAnalyzer, OracleSet,
    ParadigmAnalyzer,
};
pub use scoring::{classify, Classification, ScoreBreakdown, Signal};
pub use stats::{CorpusStatistics, StatisticsBuilder};
pub use text::{normalize, tokenize, HyphenationMerger, NormalizedForm, Position, RomanNumeralFilter, Token};

// Re-export incremental processing and reporting utilities
pub use incremental::{generate_report_path, report_exists, should_process};
pub use report::{FileStats, ReportFormat, RunStats};
