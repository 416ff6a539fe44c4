// WHY: public utilities for incremental runs, shared by the CLI and tests
// A document counts as done when its report exists next to it; --overwrite-all ignores that

use std::path::{Path, PathBuf};

use crate::report::ReportFormat;

/// Appended to the source stem of every generated report
pub const REPORT_SUFFIX: &str = "_marginalia";

/// Report path for a source document, e.g. `folio_12r.txt` -> `folio_12r_marginalia.tsv`
pub fn generate_report_path(source_path: &Path, format: ReportFormat) -> PathBuf {
    let mut report_path = source_path.to_path_buf();
    let file_stem = report_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    report_path.set_file_name(format!("{file_stem}{REPORT_SUFFIX}.{}", format.extension()));
    report_path
}

/// Check whether the report for a source document already exists
pub fn report_exists<P: AsRef<Path>>(source_path: P, format: ReportFormat) -> bool {
    generate_report_path(source_path.as_ref(), format).exists()
}

/// Decide whether a document needs (re)processing
pub fn should_process(source_path: &Path, format: ReportFormat, overwrite_all: bool) -> bool {
    overwrite_all || !report_exists(source_path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_path_per_format() {
        let source = Path::new("/corpus/codex/folio_12r.txt");
        assert_eq!(
            generate_report_path(source, ReportFormat::Tsv),
            PathBuf::from("/corpus/codex/folio_12r_marginalia.tsv")
        );
        assert_eq!(
            generate_report_path(source, ReportFormat::Json),
            PathBuf::from("/corpus/codex/folio_12r_marginalia.json")
        );
        assert_eq!(
            generate_report_path(source, ReportFormat::Annotated),
            PathBuf::from("/corpus/codex/folio_12r_marginalia.txt")
        );
    }

    #[test]
    fn test_should_process_respects_existing_report() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("charter.txt");
        std::fs::write(&source, "et").unwrap();

        assert!(should_process(&source, ReportFormat::Tsv, false));
        std::fs::write(generate_report_path(&source, ReportFormat::Tsv), "line\n").unwrap();
        assert!(report_exists(&source, ReportFormat::Tsv));
        assert!(!should_process(&source, ReportFormat::Tsv, false));
        assert!(should_process(&source, ReportFormat::Tsv, true));
        assert!(should_process(&source, ReportFormat::Json, false));
    }
}
