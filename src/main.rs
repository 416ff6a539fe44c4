use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn, Level};

use marginalia::discovery::{self, FileValidation};
use marginalia::reader::{AsyncFileReader, ReaderConfig};
use marginalia::report::{write_report, FileStats, ReportFormat, RunStats};
use marginalia::{
    generate_report_path, should_process, Classification, ClassicalOracle, MedievalOracle, ParadigmAnalyzer,
    ScoringConfig, ValidationEngine,
};

#[derive(Parser, Debug)]
#[command(name = "marginalia")]
#[command(about = "Lexical plausibility scoring for medieval Latin transcriptions")]
#[command(version)]
struct Args {
    /// Transcription file, or directory searched recursively for *.txt
    input: PathBuf,

    /// Medieval word list, one form per line
    #[arg(long)]
    dictionary: PathBuf,

    /// Classical lexicon: lemma<TAB>paradigm[<TAB>stems]
    #[arg(long)]
    lexicon: PathBuf,

    /// TOML file overriding scoring weights, thresholds and word lists
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format written next to each document
    #[arg(long, value_enum, default_value_t = ReportFormat::Tsv)]
    format: ReportFormat,

    /// Memory-map the dictionary instead of reading it
    #[arg(long)]
    use_mmap: bool,

    /// Rewrite reports that already exist
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Documents scored concurrently (default: number of CPUs)
    #[arg(long)]
    jobs: Option<usize>,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout stays free for the summary; logs go to stderr as JSON
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting marginalia");
    info!(?args, "Parsed CLI arguments");

    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let started = Instant::now();

    let engine = Arc::new(build_engine(&args)?);

    let discovery_config = discovery::DiscoveryConfig { fail_fast: args.fail_fast };
    let documents = discovery::collect_discovered_files(&args.input, discovery_config).await?;
    info!("Discovered {} documents under {}", documents.len(), args.input.display());

    let progress = progress_bar(documents.len() as u64, args.no_progress)?;
    let jobs = args.jobs.unwrap_or_else(num_cpus::get).max(1);
    let options = ProcessOptions {
        format: args.format,
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
    };

    // WHY: buffered (not unordered) keeps per-file stats in discovery order
    let file_stats: Vec<FileStats> = stream::iter(documents)
        .map(|validation| {
            let engine = engine.clone();
            let progress = progress.clone();
            async move {
                let result = process_document(engine, validation, options).await;
                progress.inc(1);
                result
            }
        })
        .buffered(jobs)
        .try_collect()
        .await?;
    progress.finish_and_clear();

    let run_stats = RunStats::from_files(
        run_start,
        started.elapsed().as_millis() as u64,
        engine.analysis_failures(),
        file_stats,
    );
    run_stats
        .write(&args.stats_out)
        .await
        .with_context(|| format!("writing run stats to {}", args.stats_out.display()))?;

    print_summary(&run_stats, &args.stats_out);
    info!(
        processed = run_stats.files_processed,
        skipped = run_stats.files_skipped,
        failed = run_stats.files_failed,
        "Run complete"
    );
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct ProcessOptions {
    format: ReportFormat,
    overwrite_all: bool,
    fail_fast: bool,
}

/// One-time blocking construction of config and oracles
fn build_engine(args: &Args) -> Result<ValidationEngine> {
    let config = match &args.config {
        Some(path) => ScoringConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => ScoringConfig::default(),
    };

    let medieval = if args.use_mmap {
        MedievalOracle::load_mmap(&args.dictionary)?
    } else {
        MedievalOracle::load(&args.dictionary)?
    };
    info!(forms = medieval.len(), mmap = args.use_mmap, "Medieval dictionary loaded");

    let analyzer = ParadigmAnalyzer::load(&args.lexicon)?;
    info!(lemmas = analyzer.lemma_count(), "Classical lexicon loaded");

    let classical = Arc::new(ClassicalOracle::new(Arc::new(analyzer)));
    Ok(ValidationEngine::new(config, classical, Arc::new(medieval))?)
}

fn progress_bar(len: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} documents")?
            .progress_chars("##-"),
    );
    Ok(bar)
}

async fn process_document(
    engine: Arc<ValidationEngine>,
    validation: FileValidation,
    options: ProcessOptions,
) -> Result<FileStats> {
    let path = validation.path;
    if let Some(error) = validation.error {
        return failure(&path, error, options.fail_fast);
    }

    if !should_process(&path, options.format, options.overwrite_all) {
        debug!("Report exists, skipping {}", path.display());
        return Ok(FileStats::skipped(&path));
    }

    let started = Instant::now();
    let reader = AsyncFileReader::new(ReaderConfig { fail_fast: options.fail_fast, ..Default::default() });
    let (lines, read_stats) = reader.read_file_lines(&path).await?;
    if let Some(error) = read_stats.read_error {
        return failure(&path, error, options.fail_fast);
    }

    let analysis = tokio::task::spawn_blocking(move || engine.score_document(lines.as_slice()))
        .await
        .context("scoring task panicked")?;

    let report_path = generate_report_path(&path, options.format);
    if let Err(e) = write_report(&report_path, &analysis, options.format).await {
        return failure(&path, format!("writing {}: {e}", report_path.display()), options.fail_fast);
    }

    debug!(
        document = %path.display(),
        tokens = analysis.statistics.total_tokens,
        "Report written to {}",
        report_path.display()
    );
    Ok(FileStats::success(
        &path,
        read_stats.lines_read,
        started.elapsed().as_millis() as u64,
        analysis.statistics,
    ))
}

fn failure(path: &Path, error: String, fail_fast: bool) -> Result<FileStats> {
    if fail_fast {
        anyhow::bail!("{}: {}", path.display(), error);
    }
    warn!("Failed {}: {}", path.display(), error);
    Ok(FileStats::failed(path, error))
}

fn print_summary(run: &RunStats, stats_out: &Path) {
    let totals = &run.totals;
    println!("marginalia v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "Documents: {} processed, {} skipped, {} failed",
        run.files_processed, run.files_skipped, run.files_failed
    );
    println!("Tokens scored: {}", totals.total_tokens);
    for tier in [Classification::Valid, Classification::Review, Classification::Suspect] {
        println!("  {:<8} {:>8} ({:.1}%)", tier.as_str(), totals.count(tier), totals.percentage(tier));
    }
    println!(
        "Skipped: {} numerals, {} short tokens; {} hyphenation merges",
        totals.skipped_numerals, totals.skipped_short, totals.hyphenation_merges
    );
    if run.analysis_failures > 0 {
        println!("Analyzer failures absorbed: {}", run.analysis_failures);
    }
    println!("Run stats written to {}", stats_out.display());
}
