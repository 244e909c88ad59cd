//! Structured logging setup for ndareview
//!
//! Pipeline stages emit `tracing` events with structured fields (stage,
//! clause index, durations). This module only owns subscriber
//! initialization; individual crates use the `tracing` macros directly.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize the tracing subscriber.
///
/// Verbose mode enables debug-level events and span close timings; the
/// default is a compact, human-readable format. `RUST_LOG` overrides both.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Member crates emit under ndareview_* targets, so a bare "ndareview"
    // directive would miss them
    let default_directives = if verbose {
        "ndareview=debug,ndareview_config=debug,ndareview_extraction=debug,\
         ndareview_llm=debug,ndareview_engine=debug,info"
    } else {
        "ndareview=info,ndareview_config=info,ndareview_extraction=info,\
         ndareview_llm=info,ndareview_engine=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}
