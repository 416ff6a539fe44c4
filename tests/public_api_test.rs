// Tests for public library API used by external callers
// WHY: The engine is usable without the CLI, so its surface must stay stable

use std::path::Path;
use std::sync::Arc;

use marginalia::engine::{CLASSICAL_LABEL, MEDIEVAL_LABEL};
use marginalia::report::{render, ReportFormat};
use marginalia::{
    generate_report_path, tokenize, CorpusStatistics, HyphenationMerger, LexicalOracle, MedievalOracle,
    RomanNumeralFilter, ScoringConfig, Signal,
};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{sample_engine, TestFixture};

/// Custom oracle implemented outside the crate
struct Cartulary;

impl LexicalOracle for Cartulary {
    fn name(&self) -> &str {
        "cartulary"
    }

    fn attests(&self, normalized_form: &str) -> bool {
        normalized_form.starts_with("cartul")
    }
}

#[test]
fn test_default_oracles_registered_in_order() {
    let engine = sample_engine();
    let labels: Vec<&str> = engine.oracles().iter().map(|o| o.label()).collect();
    assert_eq!(labels, vec![CLASSICAL_LABEL, MEDIEVAL_LABEL]);
    let weights: Vec<i32> = engine.oracles().iter().map(|o| o.weight()).collect();
    assert_eq!(weights, vec![30, 40]);
}

#[test]
fn test_external_oracle_plugs_in() {
    let engine = sample_engine().with_oracle("cartulary", 20, Arc::new(Cartulary));
    let analysis = engine.score_document(&["cartulas"]);
    let token = &analysis.tokens[0];
    assert_eq!(token.score, 70);
    assert_eq!(
        token.breakdown.components[0].reason,
        Signal::Attested { oracle: "cartulary".to_string() }
    );
}

#[test]
fn test_text_building_blocks() {
    let merger = HyphenationMerger::with_default_marks().unwrap();
    let lines = merger.merge(&["eccle-", "sia dei"]);
    let tokens = tokenize(&lines);
    let forms: Vec<&str> = tokens.iter().map(|t| t.normalized_form()).collect();
    assert_eq!(forms, vec!["ecclesia", "dei"]);

    let numerals = RomanNumeralFilter::default();
    assert!(numerals.is_dotted_roman_numeral("xuiii."));
    assert!(!numerals.is_dotted_roman_numeral("xuiii"));
}

#[test]
fn test_render_dispatch() {
    let analysis = sample_engine().score_document(&["abbatissa monachuss"]);
    let tsv = render(&analysis, ReportFormat::Tsv).unwrap();
    assert_eq!(tsv.lines().count(), 3);
    let json = render(&analysis, ReportFormat::Json).unwrap();
    assert!(json.contains("\"statistics\""));
    let annotated = render(&analysis, ReportFormat::Annotated).unwrap();
    assert_eq!(annotated.trim_end(), "abbatissa [?monachuss]");
}

#[test]
fn test_config_file_round_trip() {
    let fixture = TestFixture::new();
    let path = fixture.create_file("marginalia.toml", "base_score = 45\n[weights]\nmedieval = 35\n");
    let config = ScoringConfig::load(&path).unwrap();
    assert_eq!(config.base_score, 45);
    assert_eq!(config.weights.medieval, 35);

    let engine = test_utils::sample_engine_with(config);
    let analysis = engine.score_document(&["abbatissa"]);
    assert_eq!(analysis.tokens[0].score, 80);
}

#[test]
fn test_statistics_combine_for_run_totals() {
    let a = sample_engine().score_document(&["abbatissa"]).statistics;
    let b = sample_engine().score_document(&["monachuss xuiii."]).statistics;
    let total = a.combine(&b);
    assert_eq!(total, CorpusStatistics { total_tokens: 2, valid: 1, review: 1, skipped_numerals: 1, ..Default::default() });
}

#[test]
fn test_medieval_oracle_source_recorded() {
    let fixture = TestFixture::new();
    let (_, dictionary) = fixture.create_resources();
    let oracle = MedievalOracle::load(&dictionary).unwrap();
    assert_eq!(oracle.source(), Some(dictionary.as_path()));
    assert!(oracle.attests("abbatissa"));
    assert!(!oracle.attests("monachuss"));

    assert!(generate_report_path(Path::new("x/folio.txt"), ReportFormat::Json).ends_with("folio_marginalia.json"));
}
