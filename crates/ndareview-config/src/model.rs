use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use ndareview_utils::error::ConfigError;

/// Default model for all provider calls
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default redlining concurrency ceiling.
///
/// Kept at 1 on purpose: the redliner's file_search calls trip provider
/// rate limits when dispatched in parallel, so the default trades latency
/// for near-sequential behavior.
pub const DEFAULT_REDLINE_CONCURRENCY: usize = 1;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// CLI argument values that override file and environment configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub model: Option<String>,
    pub vector_store_id: Option<String>,
    pub redline_concurrency: Option<usize>,
    pub request_timeout: Option<u64>,
    pub verbose: Option<bool>,
}

/// Provider section of the configuration (`[provider]` in config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider name; only "openai" is supported
    #[serde(default = "default_provider")]
    pub name: String,
    /// Base URL for the provider API (no trailing slash)
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Model used for summarization, segmentation, and redlining
    pub model: Option<String>,
    /// Maximum output tokens per response
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

fn default_provider() -> String {
    "openai".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            base_url: None,
            api_key_env: None,
            model: None,
            max_output_tokens: None,
            temperature: None,
        }
    }
}

/// Effective configuration for a run.
///
/// Built by [`Config::discover`]; read-only for the duration of the run.
/// Components receive `&Config` explicitly rather than reading ambient
/// state, so tests can construct configs directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    /// Playbook vector store identifier(s) for the redliner's file_search.
    /// The CLI surface sets a single id; the list form exists because a
    /// redline call may search several stores.
    pub vector_store_ids: Vec<String>,
    /// Maximum concurrent redlining calls
    pub redline_concurrency: usize,
    /// Per-request provider timeout
    pub request_timeout: Duration,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            vector_store_ids: Vec::new(),
            redline_concurrency: DEFAULT_REDLINE_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            verbose: false,
        }
    }
}

impl Config {
    /// Resolved model name
    #[must_use]
    pub fn model(&self) -> &str {
        self.provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Require the vector store id(s) to be configured.
    ///
    /// Called before any network activity so that a missing store id is a
    /// startup-time fatal error, not a mid-run surprise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` when no store id is set.
    pub fn require_vector_stores(&self) -> Result<&[String], ConfigError> {
        if self.vector_store_ids.is_empty() {
            return Err(ConfigError::MissingRequired(format!(
                "vector store id (set {} or pass --vector-store)",
                crate::VECTOR_STORE_ENV
            )));
        }
        Ok(&self.vector_store_ids)
    }

    /// Validate tunable ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for out-of-range tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redline_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "redline_concurrency".to_string(),
                value: "0 (must be at least 1)".to_string(),
            });
        }
        if self.request_timeout < Duration::from_secs(5) {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                value: format!("{}s (must be at least 5s)", self.request_timeout.as_secs()),
            });
        }
        Ok(())
    }

    /// Minimal configuration for unit tests: no network-related values set.
    #[must_use]
    pub fn minimal_for_testing() -> Self {
        Self {
            vector_store_ids: vec!["vs_test".to_string()],
            ..Self::default()
        }
    }
}
