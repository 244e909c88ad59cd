//! ndareview - NDA contract review pipeline with playbook-grounded redlining
//!
//! ndareview extracts the text of an NDA contract, summarizes it, segments
//! it into legal clauses, redlines each clause against a negotiation
//! playbook hosted in a provider vector store, and aggregates everything
//! into a Markdown report.
//!
//! ndareview can be used in two ways:
//! - **CLI**: run `ndareview analyze <contract>` from the command line
//! - **Library**: depend on the member crates and drive
//!   [`ndareview_engine::run_analysis`] directly with your own backend
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # One-time: index the playbook and note the printed store id
//! ndareview setup-store playbook.md
//! export NDAREVIEW_VECTOR_STORE_ID="vs_..."
//!
//! # Review a contract; the report lands next to where you invoked the tool
//! export OPENAI_API_KEY="sk-..."
//! ndareview analyze acme_nda.pdf
//! ```
//!
//! # Report markup
//!
//! Redlined clauses use literal Markdown markup: `~~text~~` for deletions,
//! `**text**` for insertions, and `<!-- comments -->` for rationale. This
//! convention is stable; downstream tooling parses it.

pub mod cli;

// Stable re-exports for library consumers
pub use ndareview_config::{CliArgs, Config};
pub use ndareview_engine::{AnalysisOutcome, run_analysis};
pub use ndareview_llm::{LlmBackend, LlmInvocation, LlmResult};
pub use ndareview_utils::error::NdaReviewError;
pub use ndareview_utils::exit_codes::ExitCode;
