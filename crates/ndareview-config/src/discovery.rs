use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ndareview_utils::error::ConfigError;

use crate::model::{CliArgs, Config, ProviderConfig};
use crate::{DEFAULT_API_KEY_ENV, VECTOR_STORE_ENV};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    provider: Option<ProviderConfig>,
    vector_store_id: Option<String>,
    vector_store_ids: Option<Vec<String>>,
    redline_concurrency: Option<usize>,
    request_timeout_secs: Option<u64>,
    verbose: Option<bool>,
}

impl Config {
    /// Discover and load configuration with precedence:
    /// CLI > config file > environment > defaults.
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or if
    /// the resolved configuration fails validation.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = env::current_dir().map_err(|e| {
            ConfigError::InvalidFile(format!("failed to get current directory: {e}"))
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory.
    ///
    /// This is the path-driven variant used by tests to avoid process-global
    /// state.
    ///
    /// # Errors
    ///
    /// Same as [`Config::discover`].
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Config file (overrides defaults)
        let config_path = if let Some(explicit_path) = &cli_args.config_path {
            Some(explicit_path.clone())
        } else {
            Self::discover_config_file_from(start_dir)
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)?;

            if let Some(provider) = file_config.provider {
                config.provider = provider;
            }
            if let Some(ids) = file_config.vector_store_ids {
                config.vector_store_ids = ids;
            }
            if let Some(id) = file_config.vector_store_id {
                config.vector_store_ids = vec![id];
            }
            if let Some(concurrency) = file_config.redline_concurrency {
                config.redline_concurrency = concurrency;
            }
            if let Some(secs) = file_config.request_timeout_secs {
                config.request_timeout = Duration::from_secs(secs);
            }
            if let Some(verbose) = file_config.verbose {
                config.verbose = verbose;
            }
        }

        // Environment (overrides file for the store id only; the API key is
        // always environment-sourced and read lazily by the backend)
        if config.vector_store_ids.is_empty()
            && let Ok(env_id) = env::var(VECTOR_STORE_ENV)
            && !env_id.is_empty()
        {
            config.vector_store_ids = vec![env_id];
        }

        // CLI overrides (highest priority)
        if let Some(model) = &cli_args.model {
            config.provider.model = Some(model.clone());
        }
        if let Some(id) = &cli_args.vector_store_id {
            config.vector_store_ids = vec![id.clone()];
        }
        if let Some(concurrency) = cli_args.redline_concurrency {
            config.redline_concurrency = concurrency;
        }
        if let Some(secs) = cli_args.request_timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(verbose) = cli_args.verbose {
            config.verbose = verbose;
        }

        config.validate()?;

        Ok(config)
    }

    /// Name of the environment variable holding the provider API key.
    #[must_use]
    pub fn api_key_env(&self) -> &str {
        self.provider
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Discover the config file by searching upward from a given directory.
    ///
    /// Walks up the directory tree looking for `.ndareview/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or the
    /// filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(".ndareview").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                break;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }

        None
    }

    /// Load configuration from a TOML file
    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::InvalidFile(format!(
                    "failed to parse config file {}: {e}",
                    path.display()
                ))
            }),
            // Missing explicit config file means defaults apply
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TomlConfig::default()),
            Err(e) => Err(ConfigError::InvalidFile(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))),
        }
    }
}
