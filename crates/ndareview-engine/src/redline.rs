//! Per-clause redlining with bounded concurrency
//!
//! Each clause gets one grounded provider call. Calls are dispatched as a
//! batch but gated by a counting semaphore whose default permit count of 1
//! keeps file_search traffic near-sequential; the provider rate-limits
//! bursts of concurrent searches. A failed clause becomes an inline error
//! placeholder so the rest of the run still completes.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use ndareview_config::Config;
use ndareview_llm::{LlmBackend, LlmInvocation};

use crate::clause::Clause;
use crate::prompts::REDLINER_INSTRUCTIONS;

/// Redlined output for one clause.
///
/// `index` refers back to the clause position from segmentation; the
/// aggregator relies on it to keep document order.
#[derive(Debug, Clone)]
pub struct RedlineResult {
    pub index: usize,
    /// Redlined markup, or an error placeholder comment when the call failed
    pub text: String,
    /// Whether the provider call succeeded for this clause
    pub succeeded: bool,
}

/// Redline every clause against the configured playbook stores.
///
/// Results come back in clause order regardless of completion order.
/// Individual failures are converted to placeholder comments, never
/// propagated; the returned vec always has one entry per input clause.
pub async fn redline_all(
    backend: Arc<dyn LlmBackend>,
    config: &Config,
    clauses: &[Clause],
) -> Vec<RedlineResult> {
    let semaphore = Arc::new(Semaphore::new(config.redline_concurrency));

    info!(
        clauses = clauses.len(),
        concurrency = config.redline_concurrency,
        "dispatching redliner calls"
    );

    let tasks = clauses.iter().map(|clause| {
        let backend = Arc::clone(&backend);
        let semaphore = Arc::clone(&semaphore);
        let invocation = LlmInvocation::new(config.model(), &clause.text, config.request_timeout)
            .with_instructions(REDLINER_INSTRUCTIONS)
            .with_file_search(config.vector_store_ids.clone());
        let clause = clause.clone();

        async move {
            // Closing the semaphore is not part of this flow, so acquire
            // cannot fail
            let _permit = semaphore.acquire().await;
            debug!(index = clause.index, "redlining clause");

            match backend.respond(invocation).await {
                Ok(result) => {
                    debug!(index = clause.index, "clause redlined");
                    RedlineResult {
                        index: clause.index,
                        text: result.text,
                        succeeded: true,
                    }
                }
                Err(e) => {
                    error!(index = clause.index, error = %e, "redliner failed for clause");
                    RedlineResult {
                        index: clause.index,
                        text: error_placeholder(&clause.text, &e.to_string()),
                        succeeded: false,
                    }
                }
            }
        }
    });

    // join_all preserves input order, so results line up with clauses
    let results = join_all(tasks).await;

    let failed = results.iter().filter(|r| !r.succeeded).count();
    if failed > 0 {
        info!(failed, total = results.len(), "redlining completed with failures");
    }

    results
}

/// Placeholder rendered into the report when a clause could not be redlined
fn error_placeholder(clause_text: &str, error: &str) -> String {
    format!("<!-- Error redlining clause: {clause_text} \n Error: {error} -->")
}
