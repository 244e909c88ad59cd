//! PDF text extraction
//!
//! `pdf_extract` emits a form feed (\x0C) between pages; the pipeline wants
//! one continuous text stream, so page breaks are normalized to blank lines.

use std::fs;
use std::path::Path;

use tracing::debug;

use ndareview_utils::error::ExtractionError;

pub(crate) fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractionError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ExtractionError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let raw = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractionError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let pages = raw.split('\x0C').count();
    debug!(path = %path.display(), pages, "extracted PDF pages");

    Ok(normalize_page_breaks(&raw))
}

fn normalize_page_breaks(raw: &str) -> String {
    raw.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_breaks_become_blank_lines() {
        let raw = "page one text\x0Cpage two text";
        assert_eq!(
            normalize_page_breaks(raw),
            "page one text\n\npage two text"
        );
    }

    #[test]
    fn test_blank_pages_are_dropped() {
        let raw = "intro\x0C  \n\x0Cterms";
        assert_eq!(normalize_page_breaks(raw), "intro\n\nterms");
    }

    #[test]
    fn test_single_page_unchanged() {
        assert_eq!(normalize_page_breaks("only page"), "only page");
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bad.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = extract_pdf_text(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { .. }));
    }
}
