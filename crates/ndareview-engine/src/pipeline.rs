//! End-to-end analysis pipeline
//!
//! Extraction runs first; summarization and segmentation then run
//! concurrently since both take the full contract text; redlining fans out
//! over the segmented clauses; aggregation writes the report. Summarizer or
//! segmenter failures abort the run, per-clause redliner failures do not.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use ndareview_config::Config;
use ndareview_llm::{LlmBackend, LlmInvocation};
use ndareview_utils::error::{LlmError, NdaReviewError};

use crate::clause::split_clauses;
use crate::prompts::{SEGMENTER_INSTRUCTIONS, SUMMARIZER_INSTRUCTIONS};
use crate::redline::redline_all;
use crate::report::{render_report, report_path_for, write_report};

/// Outcome of a completed analysis run
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Where the report was written
    pub report_path: PathBuf,
    /// Number of clauses the segmenter produced
    pub clause_count: usize,
    /// Clauses whose redlining failed and became placeholders
    pub failed_clauses: usize,
}

/// Run the full review pipeline for one contract.
///
/// `output_path` overrides the default `<contract-basename>.md` location.
///
/// # Errors
///
/// Returns `NdaReviewError` for extraction failures, summarizer or
/// segmenter provider failures, and report write failures. Redliner
/// failures are captured in the report instead.
pub async fn run_analysis(
    config: &Config,
    backend: Arc<dyn LlmBackend>,
    contract_path: &Path,
    output_path: Option<&Path>,
) -> Result<AnalysisOutcome, NdaReviewError> {
    // Fail on missing store configuration before any network call
    config.require_vector_stores()?;

    let document = ndareview_extraction::extract(contract_path)?;
    info!(
        path = %contract_path.display(),
        chars = document.text.len(),
        "contract extracted, starting analysis"
    );

    // Both stages take the full text and are independent
    let (summary, segmenter_output) = tokio::try_join!(
        summarize(config, Arc::clone(&backend), &document.text),
        segment(config, Arc::clone(&backend), &document.text),
    )?;

    let clauses = split_clauses(&segmenter_output);

    let redlines = if clauses.is_empty() {
        warn!("segmenter returned no clauses, skipping redlining");
        Vec::new()
    } else {
        redline_all(backend, config, &clauses).await
    };
    let failed_clauses = redlines.iter().filter(|r| !r.succeeded).count();

    let report = render_report(contract_path, &summary, &redlines);
    let report_path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| report_path_for(contract_path));
    write_report(&report_path, &report)?;

    Ok(AnalysisOutcome {
        report_path,
        clause_count: clauses.len(),
        failed_clauses,
    })
}

async fn summarize(
    config: &Config,
    backend: Arc<dyn LlmBackend>,
    contract_text: &str,
) -> Result<String, LlmError> {
    info!("running summarizer");
    let invocation = LlmInvocation::new(config.model(), contract_text, config.request_timeout)
        .with_instructions(SUMMARIZER_INSTRUCTIONS);
    let result = backend.respond(invocation).await?;
    Ok(result.text)
}

async fn segment(
    config: &Config,
    backend: Arc<dyn LlmBackend>,
    contract_text: &str,
) -> Result<String, LlmError> {
    info!("running clause segmenter");
    let invocation = LlmInvocation::new(config.model(), contract_text, config.request_timeout)
        .with_instructions(SEGMENTER_INSTRUCTIONS);
    let result = backend.respond(invocation).await?;
    Ok(result.text)
}
