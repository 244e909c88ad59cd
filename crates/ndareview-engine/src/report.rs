//! Report aggregation and output
//!
//! Renders the summary plus the ordered redlined clauses into one Markdown
//! document and writes it next to where the tool was invoked. Clause markup
//! (`~~deletions~~`, `**insertions**`, `<!-- rationale -->`) passes through
//! untouched; it is the contract consumers parse.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use ndareview_utils::error::ReportError;

use crate::redline::RedlineResult;

/// Render the final Markdown report.
///
/// Sections appear in fixed order: title, contract summary, then one block
/// per redlined clause in document order.
#[must_use]
pub fn render_report(contract_path: &Path, summary: &str, redlines: &[RedlineResult]) -> String {
    let contract_name = contract_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("contract");

    let mut out = String::new();
    out.push_str(&format!("# NDA Review: {contract_name}\n\n"));
    out.push_str("## Contract Summary\n\n");
    out.push_str(summary.trim_end());
    out.push_str("\n\n");
    out.push_str(&format!(
        "## Redlined Clauses ({} processed)\n\n",
        redlines.len()
    ));

    if redlines.is_empty() {
        out.push_str("No clauses were redlined.\n");
        return out;
    }

    for redline in redlines {
        out.push_str(&format!("### Clause {}\n\n", redline.index + 1));
        out.push_str(redline.text.trim_end());
        out.push_str("\n\n");
    }

    out
}

/// Default report path: `<contract-basename>.md` in the current directory.
#[must_use]
pub fn report_path_for(contract_path: &Path) -> PathBuf {
    let stem = contract_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");
    PathBuf::from(format!("{stem}.md"))
}

/// Write the rendered report.
///
/// Plain write, no atomicity: a crash mid-write leaves a partial file, and
/// an existing report for the same contract is overwritten.
///
/// # Errors
///
/// Returns `ReportError::Write` when the file cannot be written.
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    fs::write(path, content).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), bytes = content.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redline(index: usize, text: &str) -> RedlineResult {
        RedlineResult {
            index,
            text: text.to_string(),
            succeeded: true,
        }
    }

    #[test]
    fn test_report_contains_summary_then_clauses_in_order() {
        let redlines = vec![
            redline(0, "~~strict~~ **mutual** confidentiality"),
            redline(1, "governing law stays <!-- no change needed -->"),
        ];
        let report = render_report(Path::new("deal.txt"), "A two-party NDA.", &redlines);

        let summary_pos = report.find("A two-party NDA.").unwrap();
        let clause1_pos = report.find("### Clause 1").unwrap();
        let clause2_pos = report.find("### Clause 2").unwrap();
        assert!(summary_pos < clause1_pos);
        assert!(clause1_pos < clause2_pos);
        assert!(report.contains("(2 processed)"));
    }

    #[test]
    fn test_markup_passes_through_verbatim() {
        let redlines = vec![redline(0, "~~5 years~~ **2 years** <!-- playbook cap -->")];
        let report = render_report(Path::new("deal.txt"), "summary", &redlines);
        assert!(report.contains("~~5 years~~ **2 years** <!-- playbook cap -->"));
    }

    #[test]
    fn test_empty_redlines_render_notice() {
        let report = render_report(Path::new("deal.txt"), "summary", &[]);
        assert!(report.contains("No clauses were redlined."));
    }

    #[test]
    fn test_report_path_uses_contract_stem() {
        assert_eq!(
            report_path_for(Path::new("/contracts/acme_nda.pdf")),
            PathBuf::from("acme_nda.md")
        );
        assert_eq!(
            report_path_for(Path::new("deal.txt")),
            PathBuf::from("deal.md")
        );
    }

    #[test]
    fn test_write_report_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out.md");
        write_report(&path, "# report\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report\n");
    }

    #[test]
    fn test_write_to_bad_path_is_report_error() {
        let err = write_report(Path::new("/nonexistent-dir/out.md"), "x").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/out.md"));
    }
}
