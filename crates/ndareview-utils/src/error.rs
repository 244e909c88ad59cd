use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Library-level error type returned by ndareview operations.
///
/// Extraction, summarization, and segmentation failures abort a run;
/// per-clause redlining failures never reach this type because they are
/// isolated inside the redliner and rendered as report placeholders.
///
/// Library code returns `NdaReviewError` and does NOT call
/// `std::process::exit()`; the CLI maps errors to exit codes via
/// [`to_exit_code()`](Self::to_exit_code).
#[derive(Error, Debug)]
pub enum NdaReviewError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Provider error: {0}")]
    Llm(#[from] LlmError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NdaReviewError {
    /// Map this error to the documented CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::Extraction(ExtractionError::UnsupportedFormat { .. }) => {
                ExitCode::UNSUPPORTED_FORMAT
            }
            Self::Extraction(_) => ExitCode::EXTRACTION_FAILED,
            Self::Llm(llm_err) => match llm_err {
                LlmError::Misconfiguration(_) | LlmError::Unsupported(_) => ExitCode::CLI_ARGS,
                LlmError::Timeout { .. } => ExitCode::PROVIDER_TIMEOUT,
                _ => ExitCode::PROVIDER_FAILURE,
            },
            Self::Report(_) | Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors produced while turning an input document into text
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("unsupported input format '.{extension}' for {}: expected .txt, .md, .text, or .pdf", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("contract file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to extract text from {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("contract file {} is empty or contains no extractable text", path.display())]
    Empty { path: PathBuf },
}

/// Errors from the LLM provider boundary.
///
/// Transport, outage, and quota errors are terminal for a single call; the
/// redliner catches them per clause while summarize/segment propagate them.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Provider misconfiguration: {0}")]
    Misconfiguration(String),

    #[error("Unsupported provider: {0}")]
    Unsupported(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuth(String),

    #[error("Provider quota/rate limit exceeded: {0}")]
    ProviderQuota(String),

    #[error("Provider outage: {0}")]
    ProviderOutage(String),

    #[error("Provider call timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider response missing expected output: {0}")]
    MissingOutput(String),
}

/// Errors while writing the final Markdown report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}
