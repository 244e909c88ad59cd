//! CLI argument definitions and parsing structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ndareview - NDA contract review with playbook-grounded redlining
#[derive(Parser)]
#[command(name = "ndareview")]
#[command(about = "Review NDA contracts: summarize, segment, and redline against a playbook")]
#[command(long_about = r#"
ndareview analyzes an NDA contract end to end: it extracts the text,
produces a plain-English summary, segments the contract into legal
clauses, redlines each clause against your negotiation playbook (hosted
in a provider vector store), and writes a single Markdown report.

EXAMPLES:
  # One-time setup: index your playbook, then export the printed id
  ndareview setup-store playbook.md
  export NDAREVIEW_VECTOR_STORE_ID="vs_..."

  # Analyze a contract (plain text or PDF)
  export OPENAI_API_KEY="sk-..."
  ndareview analyze acme_nda.pdf

  # Write the report somewhere specific, with verbose progress
  ndareview analyze acme_nda.txt --output reviews/acme.md --verbose

  # Allow two redlining calls in flight instead of the sequential default
  ndareview analyze acme_nda.txt --redline-concurrency 2

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file >
  environment > defaults. The config file is discovered by searching
  upward from CWD for .ndareview/config.toml; use --config for an
  explicit path. The provider API key is always read from the
  environment (OPENAI_API_KEY by default) and never stored in config.

REPORT MARKUP:
  Redlined clauses use ~~strike-through~~ for deletions, **bold** for
  insertions, and <!-- comments --> for rationale.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model to use for provider calls
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Playbook vector store id (overrides NDAREVIEW_VECTOR_STORE_ID)
    #[arg(long, global = true)]
    pub vector_store: Option<String>,

    /// Maximum concurrent redlining calls (default: 1, near-sequential)
    #[arg(long, global = true)]
    pub redline_concurrency: Option<usize>,

    /// Per-request provider timeout in seconds (default: 300, min: 5)
    #[arg(long, global = true)]
    pub request_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full review pipeline on a contract file (.txt, .md, .pdf)
    Analyze {
        /// Path to the contract file
        contract: PathBuf,

        /// Report output path (default: <contract-basename>.md in CWD)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a playbook file and build an indexed vector store over it
    SetupStore {
        /// Path to the playbook file
        playbook: PathBuf,

        /// Display name for the store (default derived from the file name)
        #[arg(long)]
        name: Option<String>,
    },
}
