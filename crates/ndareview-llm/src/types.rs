//! Core types for LLM backend invocations

use async_trait::async_trait;
use std::time::Duration;

use ndareview_utils::error::LlmError;

/// A single provider invocation.
///
/// Carries the user input, optional system instructions, and the vector
/// store ids to search when the call should be grounded in the playbook.
/// An empty `vector_store_ids` means a plain text-only call.
#[derive(Debug, Clone)]
pub struct LlmInvocation {
    /// Model identifier, e.g. "gpt-4o"
    pub model: String,
    /// System-level instructions for the call
    pub instructions: Option<String>,
    /// User input text
    pub input: String,
    /// Vector store ids for file_search grounding; empty disables the tool
    pub vector_store_ids: Vec<String>,
    /// Per-call timeout
    pub timeout: Duration,
}

impl LlmInvocation {
    /// Create a plain invocation with no instructions or grounding.
    pub fn new(model: impl Into<String>, input: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            instructions: None,
            input: input.into(),
            vector_store_ids: Vec::new(),
            timeout,
        }
    }

    /// Attach system instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Ground the call in one or more playbook vector stores.
    #[must_use]
    pub fn with_file_search(mut self, vector_store_ids: Vec<String>) -> Self {
        self.vector_store_ids = vector_store_ids;
        self
    }
}

/// Result of a provider invocation
#[derive(Debug, Clone)]
pub struct LlmResult {
    /// Response text, non-empty
    pub text: String,
    /// Provider that produced the response
    pub provider: String,
    /// Model that produced the response
    pub model: String,
    /// Input token count if the provider reported usage
    pub tokens_input: Option<u64>,
    /// Output token count if the provider reported usage
    pub tokens_output: Option<u64>,
}

impl LlmResult {
    pub fn new(text: impl Into<String>, provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
            model: model.into(),
            tokens_input: None,
            tokens_output: None,
        }
    }
}

/// Trait implemented by provider backends.
///
/// Backends are `Send + Sync` so a single instance can serve concurrent
/// redlining calls behind an `Arc`.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Execute one invocation against the provider.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` for auth, quota, outage, timeout, transport, and
    /// malformed-response failures.
    async fn respond(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError>;

    /// Stable provider name for logs and reports.
    fn name(&self) -> &str;
}
