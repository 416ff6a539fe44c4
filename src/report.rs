// WHY: report rendering kept apart from scoring so every format sees the same analysis
// Also holds per-file and per-run statistics; only `write_report` touches the filesystem

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::engine::{DocumentAnalysis, ScoredToken};
use crate::scoring::Classification;
use crate::stats::CorpusStatistics;
use crate::text::{normalize, Position};

pub const TSV_HEADER: &str = "line\tword\tsurface\tnormalized\tscore\ttier\treasons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One row per scored token
    #[default]
    Tsv,
    /// Tokens with breakdowns plus the document statistics
    Json,
    /// Merged text with REVIEW as [?word] and SUSPECT as [!word]
    Annotated,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Tsv => "tsv",
            ReportFormat::Json => "json",
            ReportFormat::Annotated => "txt",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tokens: &'a [ScoredToken],
    statistics: &'a CorpusStatistics,
}

pub fn render_tsv(analysis: &DocumentAnalysis) -> String {
    let mut out = String::with_capacity(64 * (analysis.tokens.len() + 1));
    out.push_str(TSV_HEADER);
    out.push('\n');
    for token in &analysis.tokens {
        let reasons: Vec<String> = token.breakdown.reasons().collect();
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            token.position.line_index,
            token.position.word_index,
            token.surface_form,
            token.normalized_form,
            token.score,
            token.classification,
            reasons.join("; ")
        );
    }
    out
}

pub fn render_json(analysis: &DocumentAnalysis) -> Result<String> {
    let report = JsonReport { tokens: &analysis.tokens, statistics: &analysis.statistics };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Merged lines with flagged words wrapped; whitespace runs collapse to one space
pub fn render_annotated(analysis: &DocumentAnalysis) -> String {
    let flagged: HashMap<Position, Classification> = analysis
        .tokens
        .iter()
        .filter(|t| t.classification != Classification::Valid)
        .map(|t| (t.position, t.classification))
        .collect();

    let mut out = String::new();
    for (line_index, line) in analysis.lines.iter().enumerate() {
        let mut word_index = 0;
        let mut rendered = Vec::new();
        for chunk in line.split_whitespace() {
            if normalize(chunk).is_empty() {
                rendered.push(chunk.to_string());
                continue;
            }
            let position = Position { line_index, word_index };
            word_index += 1;
            rendered.push(match flagged.get(&position) {
                Some(Classification::Review) => format!("[?{chunk}]"),
                Some(Classification::Suspect) => format!("[!{chunk}]"),
                _ => chunk.to_string(),
            });
        }
        out.push_str(&rendered.join(" "));
        out.push('\n');
    }
    out
}

pub fn render(analysis: &DocumentAnalysis, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Tsv => Ok(render_tsv(analysis)),
        ReportFormat::Json => render_json(analysis),
        ReportFormat::Annotated => Ok(render_annotated(analysis)),
    }
}

/// Write a report with buffered async I/O
pub async fn write_report(path: &Path, analysis: &DocumentAnalysis, format: ReportFormat) -> Result<()> {
    let content = render(analysis, format)?;
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    pub lines_read: u64,
    pub processing_time_ms: u64,
    /// Processing status (success, skipped, failed)
    pub status: String,
    pub error: Option<String>,
    pub statistics: CorpusStatistics,
}

impl FileStats {
    pub fn success(path: &Path, lines_read: u64, processing_time_ms: u64, statistics: CorpusStatistics) -> Self {
        Self {
            path: path.display().to_string(),
            lines_read,
            processing_time_ms,
            status: "success".to_string(),
            error: None,
            statistics,
        }
    }

    pub fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            lines_read: 0,
            processing_time_ms: 0,
            status: "skipped".to_string(),
            error: None,
            statistics: CorpusStatistics::default(),
        }
    }

    pub fn failed(path: &Path, error: impl Into<String>) -> Self {
        Self {
            path: path.display().to_string(),
            lines_read: 0,
            processing_time_ms: 0,
            status: "failed".to_string(),
            error: Some(error.into()),
            statistics: CorpusStatistics::default(),
        }
    }
}

/// Whole-run summary written to --stats-out
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Seconds since the Unix epoch when the run started
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    /// Classical analyzer failures absorbed during the run
    pub analysis_failures: u64,
    pub totals: CorpusStatistics,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn from_files(run_start: u64, total_processing_time_ms: u64, analysis_failures: u64, file_stats: Vec<FileStats>) -> Self {
        let count = |status: &str| file_stats.iter().filter(|f| f.status == status).count() as u64;
        let totals = file_stats
            .iter()
            .fold(CorpusStatistics::default(), |acc, f| acc.combine(&f.statistics));
        Self {
            run_start,
            total_processing_time_ms,
            files_processed: count("success"),
            files_skipped: count("skipped"),
            files_failed: count("failed"),
            analysis_failures,
            totals,
            file_stats,
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
