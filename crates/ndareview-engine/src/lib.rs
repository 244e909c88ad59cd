//! NDA review pipeline: extraction, summarization, clause segmentation,
//! playbook-grounded redlining, and report aggregation.

pub mod clause;
pub mod pipeline;
pub mod prompts;
pub mod redline;
pub mod report;

pub use clause::{CLAUSE_DELIMITER, Clause, split_clauses};
pub use pipeline::{AnalysisOutcome, run_analysis};
pub use redline::{RedlineResult, redline_all};
