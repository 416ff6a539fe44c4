// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use marginalia::{ClassicalOracle, MedievalOracle, ParadigmAnalyzer, ScoringConfig, ValidationEngine};

pub const CLASSICAL_LEXICON: &str = include_str!("../../data/classical_lexicon.tsv");
pub const MEDIEVAL_WORDLIST: &str = include_str!("../../data/medieval_wordlist.txt");

/// Test fixture helper for a temporary corpus plus lexical resources
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Create a transcription (or any file) relative to the fixture root
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write the sample lexicon and word list outside the corpus directory
    pub fn create_resources(&self) -> (PathBuf, PathBuf) {
        let lexicon = self.create_file("resources/classical_lexicon.tsv", CLASSICAL_LEXICON);
        let dictionary = self.create_file("resources/medieval_wordlist.txt", MEDIEVAL_WORDLIST);
        (lexicon, dictionary)
    }

    /// Directory intended for transcriptions only
    pub fn corpus_dir(&self) -> PathBuf {
        let dir = self.root_path.join("corpus");
        fs::create_dir_all(&dir).expect("Failed to create corpus directory");
        dir
    }
}

/// Engine wired to the bundled sample resources and default config
pub fn sample_engine() -> ValidationEngine {
    sample_engine_with(ScoringConfig::default())
}

pub fn sample_engine_with(config: ScoringConfig) -> ValidationEngine {
    let analyzer = ParadigmAnalyzer::parse(CLASSICAL_LEXICON, Path::new("data/classical_lexicon.tsv"))
        .expect("sample lexicon parses");
    let classical = Arc::new(ClassicalOracle::new(Arc::new(analyzer)));
    let medieval = Arc::new(MedievalOracle::from_word_list(MEDIEVAL_WORDLIST));
    ValidationEngine::new(config, classical, medieval).expect("default config is valid")
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines",
            context,
            expected_lines.len(),
            actual_lines.len()
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}
