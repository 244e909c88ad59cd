//! LLM provider backends for ndareview
//!
//! The pipeline talks to providers through the [`LlmBackend`] trait; this
//! crate supplies the OpenAI implementation plus the vector store
//! provisioning client used by the setup command.

use std::sync::Arc;

use ndareview_config::Config;
use ndareview_utils::error::LlmError;

mod http_client;
mod openai_backend;
mod types;
mod vector_store;

pub use types::{LlmBackend, LlmInvocation, LlmResult};
pub use vector_store::{SetupOutcome, VectorStoreClient};

use openai_backend::OpenAiBackend;

/// Create a backend for the configured provider.
///
/// # Errors
///
/// Returns `LlmError::Unsupported` for unknown provider names and
/// `LlmError::Misconfiguration` when the provider cannot be constructed
/// (missing API key, unbuildable HTTP client).
pub fn create_backend(config: &Config) -> Result<Arc<dyn LlmBackend>, LlmError> {
    match config.provider.name.as_str() {
        "openai" => Ok(Arc::new(OpenAiBackend::new_from_config(config)?)),
        other => Err(LlmError::Unsupported(format!(
            "unknown provider '{other}' (supported: openai)"
        ))),
    }
}
