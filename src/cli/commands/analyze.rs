//! `analyze` command: run the full review pipeline on one contract

use std::path::Path;

use tracing::info;

use ndareview_config::Config;
use ndareview_engine::run_analysis;
use ndareview_utils::error::NdaReviewError;

/// Execute the analyze command.
///
/// # Errors
///
/// Returns `NdaReviewError` for extraction, summarizer/segmenter provider,
/// and report write failures. Per-clause redlining failures are rendered
/// into the report instead.
pub async fn execute_analyze_command(
    contract: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), NdaReviewError> {
    info!(contract = %contract.display(), "starting contract analysis");

    let backend = ndareview_llm::create_backend(config)?;
    let outcome = run_analysis(config, backend, contract, output).await?;

    if outcome.failed_clauses > 0 {
        println!(
            "Analysis complete with {} of {} clauses failing redlining. Report saved to: {}",
            outcome.failed_clauses,
            outcome.clause_count,
            outcome.report_path.display()
        );
    } else {
        println!(
            "Analysis complete ({} clauses). Report saved to: {}",
            outcome.clause_count,
            outcome.report_path.display()
        );
    }

    Ok(())
}
