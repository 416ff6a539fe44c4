// WHY: medieval Latin word list oracle (Du Cange style: one form per line)
// Loaded once, fully into memory, and never mutated afterward

use memmap2::Mmap;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use super::LexicalOracle;
use crate::error::ResourceLoadError;
use crate::text::normalize_form;

const RESOURCE: &str = "medieval word list";

pub struct MedievalOracle {
    forms: HashSet<String>,
    source: Option<PathBuf>,
}

impl MedievalOracle {
    /// Build from in-memory forms; each is normalized on insertion
    pub fn from_forms<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let forms = forms
            .into_iter()
            .map(|form| normalize_form(form.as_ref().trim()))
            .filter(|form| !form.is_empty())
            .collect();
        Self { forms, source: None }
    }

    /// Parse newline-delimited word list content; blank lines and '#' comments are skipped
    pub fn from_word_list(content: &str) -> Self {
        Self::from_forms(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Read the word list with a single buffered read
    pub fn load(path: &Path) -> Result<Self, ResourceLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ResourceLoadError::Io {
            resource: RESOURCE,
            path: path.to_path_buf(),
            source,
        })?;
        let content = std::str::from_utf8(&bytes).map_err(|_| ResourceLoadError::Encoding {
            resource: RESOURCE,
            path: path.to_path_buf(),
        })?;
        Self::finish_load(content, path)
    }

    /// Read the word list through a memory map
    pub fn load_mmap(path: &Path) -> Result<Self, ResourceLoadError> {
        let io_error = |source| ResourceLoadError::Io {
            resource: RESOURCE,
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        // The map is read once and dropped before this function returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        let content = std::str::from_utf8(&mmap).map_err(|_| ResourceLoadError::Encoding {
            resource: RESOURCE,
            path: path.to_path_buf(),
        })?;
        Self::finish_load(content, path)
    }

    fn finish_load(content: &str, path: &Path) -> Result<Self, ResourceLoadError> {
        let mut oracle = Self::from_word_list(content);
        if oracle.forms.is_empty() {
            return Err(ResourceLoadError::Empty {
                resource: RESOURCE,
                path: path.to_path_buf(),
            });
        }
        oracle.source = Some(path.to_path_buf());
        info!(path = %path.display(), forms = oracle.forms.len(), "Loaded medieval word list");
        Ok(oracle)
    }

    /// Check whether a normalized form is in the list
    pub fn attested(&self, normalized_form: &str) -> bool {
        self.forms.contains(normalized_form)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl LexicalOracle for MedievalOracle {
    fn name(&self) -> &str {
        "medieval"
    }

    fn attests(&self, normalized_form: &str) -> bool {
        self.attested(normalized_form)
    }
}
