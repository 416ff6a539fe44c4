// WHY: typed errors for the library layer; the CLI wraps them in anyhow context
// Construction-time failures are fatal; per-token analysis failures are absorbed by the oracles

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while loading a lexical resource at engine construction
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("failed to read {resource} at {}: {source}", path.display())]
    Io {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{resource} at {} is not valid UTF-8", path.display())]
    Encoding {
        resource: &'static str,
        path: PathBuf,
    },

    #[error("{}:{line}: {message}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{resource} at {} contains no entries", path.display())]
    Empty {
        resource: &'static str,
        path: PathBuf,
    },
}

/// Per-token failure raised by a morphological analyzer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisFailure {
    #[error("cannot analyze an empty form")]
    Empty,

    #[error("form `{form}` contains non-alphabetic character {ch:?}")]
    Malformed { form: String, ch: char },

    #[error("form `{form}` exceeds {max} characters")]
    TooLong { form: String, max: usize },

    #[error("analyzer unavailable: {0}")]
    Unavailable(String),
}

/// Invalid or unreadable scoring configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_messages_name_the_resource() {
        let err = ResourceLoadError::Empty {
            resource: "medieval word list",
            path: PathBuf::from("/tmp/ducange.txt"),
        };
        assert_eq!(err.to_string(), "medieval word list at /tmp/ducange.txt contains no entries");

        let err = ResourceLoadError::Format {
            path: PathBuf::from("lexicon.tsv"),
            line: 7,
            message: "unknown paradigm `zz`".to_string(),
        };
        assert_eq!(err.to_string(), "lexicon.tsv:7: unknown paradigm `zz`");
    }

    #[test]
    fn test_analysis_failure_display() {
        let err = AnalysisFailure::Malformed { form: "ab3c".to_string(), ch: '3' };
        assert!(err.to_string().contains("'3'"));
    }
}
