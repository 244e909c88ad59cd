//! Shared infrastructure for the ndareview pipeline: the error taxonomy,
//! CLI exit codes, and tracing setup.

pub mod error;
pub mod exit_codes;
pub mod logging;

pub use error::{ConfigError, ExtractionError, LlmError, NdaReviewError, ReportError};
pub use exit_codes::ExitCode;
