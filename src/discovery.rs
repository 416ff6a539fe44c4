use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::incremental::REPORT_SUFFIX;

/// Configuration for document discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first inaccessible document or continue
    pub fail_fast: bool,
}

/// Result of document discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// True for files this tool wrote itself; they must never be fed back in
pub fn is_generated_report(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(REPORT_SUFFIX))
}

/// Discovers transcriptions matching `**/*.txt` under the given root.
/// A root that is itself a file is yielded as the only document.
///
/// # Arguments
/// * `root` - Directory to search recursively, or a single document
/// * `config` - Discovery configuration (fail_fast behavior)
pub fn discover_documents(
    root: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root = root.as_ref().to_path_buf();

    futures::stream::unfold(DiscoveryState::new(root, config), |mut state| async move {
        state.next_file().await.map(|result| (result, state))
    })
}

/// Internal state for document discovery iteration
struct DiscoveryState {
    root: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
    single_file_done: bool,
}

impl DiscoveryState {
    fn new(root: PathBuf, config: DiscoveryConfig) -> Self {
        Self { root, config, glob_iter: None, single_file_done: false }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.root.is_file() {
            if self.single_file_done {
                return None;
            }
            self.single_file_done = true;
            debug!("Single document input: {}", self.root.display());
            return Some(self.validate_file(self.root.clone()).await);
        }

        if self.glob_iter.is_none() {
            // WHY: escape the root so brackets or stars in directory names are taken literally
            let pattern = format!("{}/**/*.txt", Pattern::escape(&self.root.to_string_lossy()));
            debug!("Starting document discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("Document discovery initialized for root: {}", self.root.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        let glob_iter = self.glob_iter.as_mut()?;
        loop {
            match glob_iter.next()? {
                Ok(path) if is_generated_report(&path) => {
                    debug!("Skipping generated report: {}", path.display());
                }
                Ok(path) => {
                    debug!("Found document: {}", path.display());
                    return Some(self.validate_file(path).await);
                }
                Err(e) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);
                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
            }
        }
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        match fs::metadata(&path).await {
            Ok(metadata) if !metadata.is_file() => {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                Ok(FileValidation { path, error: Some(error) })
            }
            Ok(_) => Ok(FileValidation { path, error: None }),
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);
                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(FileValidation { path, error: Some(error) })
                }
            }
        }
    }
}

/// Collect all discovered documents into a Vec for easier processing
pub async fn collect_discovered_files(
    root: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_documents(root, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;
    if invalid_count > 0 {
        warn!("Found {} documents with validation issues", invalid_count);
    }
    info!("Document discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}
