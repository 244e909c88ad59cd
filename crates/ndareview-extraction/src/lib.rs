//! Contract text extraction for ndareview
//!
//! Turns an input file into plain text for the review pipeline. Plain-text
//! files are read directly; PDFs go through `pdf-extract`. The format is
//! chosen by file extension before any bytes are read, so an unsupported
//! extension fails fast without touching the filesystem beyond the
//! existence check.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use ndareview_utils::error::ExtractionError;

mod pdf;

/// Input format, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// .txt, .md, or .text read as UTF-8
    Plain,
    /// .pdf extracted via pdf-extract
    Pdf,
}

impl DocumentFormat {
    /// Classify a path by its extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::UnsupportedFormat` for any other extension,
    /// including a missing one.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" | "text" => Ok(Self::Plain),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExtractionError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// An extracted contract document
#[derive(Debug, Clone)]
pub struct Document {
    /// Source path the text came from
    pub path: PathBuf,
    pub format: DocumentFormat,
    /// Full extracted text, non-empty
    pub text: String,
}

/// Extract the full text of a contract file.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` before reading anything if
/// the extension is not recognized, `NotFound` if the file does not exist,
/// `Parse` if the bytes cannot be decoded, and `Empty` if extraction yields
/// only whitespace.
pub fn extract(path: &Path) -> Result<Document, ExtractionError> {
    let format = DocumentFormat::from_path(path)?;

    if !path.exists() {
        return Err(ExtractionError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = match format {
        DocumentFormat::Plain => read_plain_text(path)?,
        DocumentFormat::Pdf => pdf::extract_pdf_text(path)?,
    };

    if text.trim().is_empty() {
        warn!(path = %path.display(), "extraction produced no text");
        return Err(ExtractionError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        format = ?format,
        chars = text.len(),
        "extracted contract text"
    );

    Ok(Document {
        path: path.to_path_buf(),
        format,
        text,
    })
}

fn read_plain_text(path: &Path) -> Result<String, ExtractionError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractionError::NotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::InvalidData => ExtractionError::Parse {
            path: path.to_path_buf(),
            reason: "file is not valid UTF-8".to_string(),
        },
        _ => ExtractionError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_extensions() {
        for name in ["a.txt", "b.md", "c.text", "D.TXT"] {
            assert_eq!(
                DocumentFormat::from_path(Path::new(name)).unwrap(),
                DocumentFormat::Plain
            );
        }
    }

    #[test]
    fn test_pdf_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("nda.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_unsupported_extension_fails_before_read() {
        // Path does not exist; the format check must fire first
        let err = extract(Path::new("/nonexistent/contract.docx")).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::UnsupportedFormat { extension, .. } if extension == "docx"
        ));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = DocumentFormat::from_path(Path::new("contract")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_extracts_txt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nda.txt");
        fs::write(&path, "Section 1. Confidential Information.\n").unwrap();

        let doc = extract(&path).unwrap();
        assert_eq!(doc.format, DocumentFormat::Plain);
        assert_eq!(doc.text, "Section 1. Confidential Information.\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.txt");
        let err = extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound { .. }));
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.txt");
        fs::write(&path, "  \n\t\n").unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x41]).unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { .. }));
    }
}
