// WHY: stem + ending morphological analyzer for classical Latin without an external parser
// Lexicon lines: `lemma<TAB>paradigm[<TAB>stem,stem...]`; endings come from built-in paradigm tables

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::classical::{Analysis, MorphologicalAnalyzer};
use crate::error::{AnalysisFailure, ResourceLoadError};
use crate::text::normalize_form;

const RESOURCE: &str = "classical lexicon";

/// Longest form the analyzer accepts
pub const MAX_FORM_CHARS: usize = 48;

/// Inflection classes; endings are written in u/i-folded spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paradigm {
    FirstDeclension,
    SecondDeclension,
    SecondNeuter,
    ThirdDeclension,
    FirstConjugation,
    SecondConjugation,
    ThirdConjugation,
    Invariable,
}

impl Paradigm {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(Self::FirstDeclension),
            "us" => Some(Self::SecondDeclension),
            "um" => Some(Self::SecondNeuter),
            "3" => Some(Self::ThirdDeclension),
            "are" => Some(Self::FirstConjugation),
            "ere" => Some(Self::SecondConjugation),
            "ere3" => Some(Self::ThirdConjugation),
            "inv" => Some(Self::Invariable),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::FirstDeclension => "a",
            Self::SecondDeclension => "us",
            Self::SecondNeuter => "um",
            Self::ThirdDeclension => "3",
            Self::FirstConjugation => "are",
            Self::SecondConjugation => "ere",
            Self::ThirdConjugation => "ere3",
            Self::Invariable => "inv",
        }
    }

    pub fn endings(&self) -> &'static [&'static str] {
        match self {
            Self::FirstDeclension => &["a", "ae", "am", "arum", "is", "as"],
            Self::SecondDeclension => &["us", "i", "o", "um", "e", "orum", "is", "os"],
            Self::SecondNeuter => &["um", "i", "o", "a", "orum", "is"],
            Self::ThirdDeclension => &["is", "i", "em", "e", "es", "um", "ium", "ibus", "a"],
            Self::FirstConjugation => &[
                "o", "as", "at", "amus", "atis", "ant", "are", "ari", "abat", "abant",
                "abit", "auit", "auerunt", "atur", "antur", "atus", "ata", "atum", "ans", "antis",
            ],
            Self::SecondConjugation => &[
                "eo", "es", "et", "emus", "etis", "ent", "ere", "eri", "ebat", "ebant",
                "ebit", "uit", "etur", "entur", "itus", "ens", "entis",
            ],
            Self::ThirdConjugation => &[
                "o", "is", "it", "imus", "itis", "unt", "ere", "i", "ebat", "ebant",
                "et", "ent", "am", "itur", "untur", "ens", "entis", "endum",
            ],
            Self::Invariable => &[],
        }
    }

    /// Ending the dictionary form carries, used to derive a default stem
    fn lemma_ending(&self) -> Option<&'static str> {
        match self {
            Self::FirstDeclension => Some("a"),
            Self::SecondDeclension => Some("us"),
            Self::SecondNeuter => Some("um"),
            Self::FirstConjugation => Some("o"),
            Self::SecondConjugation => Some("eo"),
            Self::ThirdConjugation => Some("o"),
            Self::ThirdDeclension | Self::Invariable => None,
        }
    }
}

#[derive(Debug, Clone)]
struct LemmaEntry {
    lemma: String,
    paradigm: Paradigm,
}

/// Recognizes lemmas and stem+ending combinations from a lexicon file
#[derive(Debug, Default)]
pub struct ParadigmAnalyzer {
    entries: Vec<LemmaEntry>,
    by_lemma: HashMap<String, Vec<usize>>,
    by_stem: HashMap<String, Vec<usize>>,
}

impl ParadigmAnalyzer {
    /// Read and parse a lexicon file
    pub fn load(path: &Path) -> Result<Self, ResourceLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ResourceLoadError::Io {
            resource: RESOURCE,
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| ResourceLoadError::Encoding {
            resource: RESOURCE,
            path: path.to_path_buf(),
        })?;
        let analyzer = Self::parse(&content, path)?;
        info!(
            path = %path.display(),
            lemmas = analyzer.entries.len(),
            stems = analyzer.by_stem.len(),
            "Loaded classical lexicon"
        );
        Ok(analyzer)
    }

    /// Parse lexicon content; `source` is only used in error messages
    pub fn parse(content: &str, source: &Path) -> Result<Self, ResourceLoadError> {
        let mut analyzer = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let format_error = |message: String| ResourceLoadError::Format {
                path: source.to_path_buf(),
                line: index + 1,
                message,
            };

            let mut columns = line.split('\t').map(str::trim);
            let lemma = normalize_form(columns.next().unwrap_or_default());
            if lemma.is_empty() {
                return Err(format_error("empty lemma".to_string()));
            }
            let code = columns
                .next()
                .filter(|code| !code.is_empty())
                .ok_or_else(|| format_error(format!("lemma `{lemma}` has no paradigm column")))?;
            let paradigm = Paradigm::from_code(code)
                .ok_or_else(|| format_error(format!("unknown paradigm `{code}`")))?;

            let mut stems: Vec<String> = columns
                .next()
                .map(|list| {
                    list.split(',')
                        .map(normalize_form)
                        .filter(|stem| !stem.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            if stems.is_empty() {
                if let Some(stem) = paradigm
                    .lemma_ending()
                    .and_then(|ending| lemma.strip_suffix(ending))
                    .filter(|stem| !stem.is_empty())
                {
                    stems.push(stem.to_string());
                } else if paradigm != Paradigm::Invariable {
                    return Err(format_error(format!(
                        "lemma `{lemma}` needs an explicit stem for paradigm `{code}`"
                    )));
                }
            }

            analyzer.insert(lemma, paradigm, stems);
        }

        if analyzer.entries.is_empty() {
            return Err(ResourceLoadError::Empty {
                resource: RESOURCE,
                path: source.to_path_buf(),
            });
        }
        Ok(analyzer)
    }

    fn insert(&mut self, lemma: String, paradigm: Paradigm, stems: Vec<String>) {
        let id = self.entries.len();
        self.by_lemma.entry(lemma.clone()).or_default().push(id);
        for stem in stems {
            self.by_stem.entry(stem).or_default().push(id);
        }
        self.entries.push(LemmaEntry { lemma, paradigm });
    }

    pub fn lemma_count(&self) -> usize {
        self.entries.len()
    }
}

impl MorphologicalAnalyzer for ParadigmAnalyzer {
    fn analyze(&self, normalized_form: &str) -> Result<Vec<Analysis>, AnalysisFailure> {
        if normalized_form.is_empty() {
            return Err(AnalysisFailure::Empty);
        }
        if normalized_form.chars().count() > MAX_FORM_CHARS {
            return Err(AnalysisFailure::TooLong {
                form: normalized_form.to_string(),
                max: MAX_FORM_CHARS,
            });
        }
        if let Some(ch) = normalized_form.chars().find(|c| !c.is_alphabetic()) {
            return Err(AnalysisFailure::Malformed { form: normalized_form.to_string(), ch });
        }

        let mut analyses = Vec::new();
        for &id in self.by_lemma.get(normalized_form).into_iter().flatten() {
            let entry = &self.entries[id];
            analyses.push(Analysis {
                lemma: entry.lemma.clone(),
                detail: format!("{}:lemma", entry.paradigm.code()),
            });
        }

        for (split, _) in normalized_form.char_indices().skip(1) {
            let (stem, ending) = normalized_form.split_at(split);
            for &id in self.by_stem.get(stem).into_iter().flatten() {
                let entry = &self.entries[id];
                if entry.paradigm.endings().contains(&ending) {
                    analyses.push(Analysis {
                        lemma: entry.lemma.clone(),
                        detail: format!("{}:{}", entry.paradigm.code(), ending),
                    });
                }
            }
        }

        Ok(analyses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "\
# lemma\tparadigm\tstems
dominus\tus
ecclesia\ta
templum\tum
rex\t3\treg
amo\tare\tam,amau
uideo\tere\tuid,uis
dico\tere3\tdic,dix
enim\tinv
";

    fn analyzer() -> ParadigmAnalyzer {
        ParadigmAnalyzer::parse(LEXICON, Path::new("inline.tsv")).unwrap()
    }

    #[test]
    fn test_lemmas_always_recognized() {
        let a = analyzer();
        assert_eq!(a.lemma_count(), 8);
        for lemma in ["dominus", "ecclesia", "rex", "enim", "amo"] {
            assert!(!a.analyze(lemma).unwrap().is_empty(), "{lemma} not recognized");
        }
    }

    #[test]
    fn test_inflected_forms_through_stems() {
        let a = analyzer();
        let analyses = a.analyze("dominorum").unwrap();
        assert_eq!(analyses, vec![Analysis { lemma: "dominus".into(), detail: "us:orum".into() }]);

        assert!(!a.analyze("ecclesiae").unwrap().is_empty());
        assert!(!a.analyze("regibus").unwrap().is_empty());
        assert!(!a.analyze("dicit").unwrap().is_empty());
        assert!(!a.analyze("uidebat").unwrap().is_empty());
        assert!(!a.analyze("amauit").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_paradigm_ending_not_recognized() {
        let a = analyzer();
        assert!(a.analyze("dominarum").unwrap().is_empty());
        assert!(a.analyze("monachuss").unwrap().is_empty());
        assert!(a.analyze("enimis").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_forms_fail() {
        let a = analyzer();
        assert_eq!(a.analyze(""), Err(AnalysisFailure::Empty));
        assert!(matches!(a.analyze("dom1nus"), Err(AnalysisFailure::Malformed { ch: '1', .. })));
        let long = "a".repeat(MAX_FORM_CHARS + 1);
        assert!(matches!(a.analyze(&long), Err(AnalysisFailure::TooLong { .. })));
    }

    #[test]
    fn test_lexicon_spellings_are_folded() {
        let a = ParadigmAnalyzer::parse("Vinum\tum\n", Path::new("inline.tsv")).unwrap();
        assert!(!a.analyze("uini").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_paradigm_reports_line() {
        let err = ParadigmAnalyzer::parse("dominus\tus\nfoo\tzz\n", Path::new("lex.tsv")).unwrap_err();
        match err {
            ResourceLoadError::Format { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("zz"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_third_declension_requires_stem() {
        let err = ParadigmAnalyzer::parse("rex\t3\n", Path::new("lex.tsv")).unwrap_err();
        assert!(matches!(err, ResourceLoadError::Format { line: 1, .. }));
    }

    #[test]
    fn test_missing_paradigm_column() {
        let err = ParadigmAnalyzer::parse("dominus\n", Path::new("lex.tsv")).unwrap_err();
        assert!(matches!(err, ResourceLoadError::Format { .. }));
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        let err = ParadigmAnalyzer::parse("# nothing\n", Path::new("lex.tsv")).unwrap_err();
        assert!(matches!(err, ResourceLoadError::Empty { .. }));
    }
}
