//! Clause segmentation
//!
//! The segmenter model is instructed to emit clause texts joined by a
//! literal delimiter. Splitting trusts that instruction: there is no
//! structural validation beyond dropping empty segments, so a response
//! without the delimiter degrades to a single clause covering the whole
//! text. That degradation is logged, not treated as an error.

use tracing::{info, warn};

/// Delimiter the segmenter model is instructed to emit between clauses
pub const CLAUSE_DELIMITER: &str = "|||";

/// A single contract clause with its position in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Zero-based position from segmentation; redline results carry it
    /// forward so the report keeps document order
    pub index: usize,
    pub text: String,
}

/// Split a segmenter response into ordered clauses.
///
/// Trims each segment and drops empty ones. Returns an empty vec only for
/// responses that are entirely whitespace or delimiters.
#[must_use]
pub fn split_clauses(response_text: &str) -> Vec<Clause> {
    if !response_text.contains(CLAUSE_DELIMITER) {
        warn!("segmenter response contains no delimiter, treating as a single clause");
    }

    let clauses: Vec<Clause> = response_text
        .split(CLAUSE_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, text)| Clause {
            index,
            text: text.to_string(),
        })
        .collect();

    info!(count = clauses.len(), "segmented contract into clauses");
    clauses
}
