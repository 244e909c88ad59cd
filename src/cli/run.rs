//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Creates the tokio runtime
//! - Dispatches to command handlers
//! - Handles all error output

use clap::Parser;

use ndareview_config::{CliArgs, Config};
use ndareview_utils::error::NdaReviewError;
use ndareview_utils::exit_codes::ExitCode;
use ndareview_utils::logging::init_tracing;

use super::args::{Cli, Commands};
use super::commands;

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns
/// `Result<(), ExitCode>`: main.rs only calls
/// `std::process::exit(code.as_i32())` on error and does NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        model: cli.model.clone(),
        vector_store_id: cli.vector_store.clone(),
        redline_concurrency: cli.redline_concurrency,
        request_timeout: cli.request_timeout,
        verbose: Some(cli.verbose),
    };

    // Discover and load configuration
    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ Configuration error: {err}");
            return Err(NdaReviewError::Config(err).to_exit_code());
        }
    };

    // Logging failures are non-fatal; a doubly-initialized subscriber in
    // embedding scenarios should not kill the run
    if let Err(e) = init_tracing(config.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    // Create tokio runtime for async operations
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to create async runtime: {e}");
            return Err(ExitCode::INTERNAL);
        }
    };

    let result = rt.block_on(async {
        match cli.command {
            Commands::Analyze { contract, output } => {
                commands::execute_analyze_command(&contract, output.as_deref(), &config).await
            }
            Commands::SetupStore { playbook, name } => {
                commands::execute_setup_store_command(&playbook, name.as_deref(), &config).await
            }
        }
    });

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("✗ {err}");
            Err(err.to_exit_code())
        }
    }
}
