use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for transcription reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone, Serialize)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

impl ReadStats {
    fn failed(path: &Path, lines_read: u64, bytes_read: u64, duration_ms: u64, error: String) -> Self {
        Self {
            file_path: path.display().to_string(),
            lines_read,
            bytes_read,
            duration_ms,
            read_error: Some(error),
        }
    }
}

/// Async reader producing the ordered raw lines of a transcription
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a document line-by-line with async buffered I/O.
    /// Without fail_fast, errors come back inside `ReadStats` with whatever lines were read.
    pub async fn read_file_lines<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of document: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open document {}: {}", path.display(), e);
                warn!("{}", error_msg);
                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                let elapsed = start_time.elapsed().as_millis() as u64;
                return Ok((Vec::new(), ReadStats::failed(path, 0, 0, elapsed, error_msg)));
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut result_lines = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1;
                    line_count += 1;
                    result_lines.push(line);
                }
                Ok(None) => break,
                Err(e) => {
                    let error_msg = format!(
                        "UTF-8 decoding error in {} at line {}: {}",
                        path.display(),
                        line_count + 1,
                        e
                    );
                    warn!("{}", error_msg);
                    if self.config.fail_fast {
                        return Err(anyhow::anyhow!(error_msg));
                    }
                    let elapsed = start_time.elapsed().as_millis() as u64;
                    let stats = ReadStats::failed(path, line_count, byte_count, elapsed, error_msg);
                    return Ok((result_lines, stats));
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            path.display(),
            line_count,
            byte_count,
            stats.duration_ms
        );
        Ok((result_lines, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf> {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, content).await?;
        Ok(file_path)
    }

    #[tokio::test]
    async fn test_read_valid_document() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());

        let content = "In nomine domini\nsancti-\ntatis est";
        let file_path = create_test_file(temp_dir.path(), "folio.txt", content).await.unwrap();

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();

        assert_eq!(lines, vec!["In nomine domini", "sancti-", "tatis est"]);
        assert_eq!(stats.lines_read, 3);
        assert!(stats.bytes_read > 0);
        assert!(stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());
        let file_path = create_test_file(temp_dir.path(), "empty.txt", "").await.unwrap();

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert!(lines.is_empty());
        assert_eq!(stats.bytes_read, 0);
        assert!(stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_nonexistent_document() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());
        let file_path = temp_dir.path().join("missing.txt");

        let (lines, stats) = reader.read_file_lines(&file_path).await.unwrap();
        assert!(lines.is_empty());
        assert!(stats.read_error.is_some());
    }

    #[tokio::test]
    async fn test_read_nonexistent_document_fail_fast() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
        let result = reader.read_file_lines(temp_dir.path().join("missing.txt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_utf8_reported_with_partial_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.txt");
        let mut bytes = b"et uerbum\n".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        std::fs::write(&path, bytes).unwrap();

        let reader = AsyncFileReader::new(ReaderConfig::default());
        let (lines, stats) = reader.read_file_lines(&path).await.unwrap();
        assert_eq!(lines, vec!["et uerbum"]);
        assert!(stats.read_error.unwrap().contains("line 2"));

        let strict = AsyncFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
        assert!(strict.read_file_lines(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_unicode_marks_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig::default());
        let content = "abba\u{2E17}\ntissa cęlum";
        let file_path = create_test_file(temp_dir.path(), "marks.txt", content).await.unwrap();

        let (lines, _) = reader.read_file_lines(&file_path).await.unwrap();
        assert_eq!(lines[0], "abba\u{2E17}");
        assert_eq!(lines[1], "tissa cęlum");
    }

    #[tokio::test]
    async fn test_small_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let reader = AsyncFileReader::new(ReaderConfig { fail_fast: false, buffer_size: 64 });

        let content = "x".repeat(500) + "\n" + &"y".repeat(500);
        let file_path = create_test_file(temp_dir.path(), "long.txt", &content).await.unwrap();

        let (lines, _) = reader.read_file_lines(&file_path).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].len(), 500);
    }
}
