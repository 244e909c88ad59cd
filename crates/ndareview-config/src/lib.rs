//! Configuration model, discovery, and validation for ndareview
//!
//! Configuration is hierarchical with precedence:
//! CLI flags > config file > environment > built-in defaults.
//!
//! The config file is discovered by searching upward from the current
//! directory for `.ndareview/config.toml`. The provider API key is never
//! stored in configuration; only the name of the environment variable that
//! holds it is configurable.

mod discovery;
mod model;

pub use model::{CliArgs, Config, ProviderConfig};

/// Environment variable holding the playbook vector store identifier
pub const VECTOR_STORE_ENV: &str = "NDAREVIEW_VECTOR_STORE_ID";

/// Default environment variable holding the provider API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
