/// Analyzer configuration
use crate::error::{AnalyzerError, Result};
use mixdesk_analysis::FetchOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given, if present
pub const DEFAULT_CONFIG_FILE: &str = "mixdesk.toml";

/// Prefix of environment overrides, e.g. `MIXDESK_FETCH__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "MIXDESK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_fetch")]
    pub fetch: FetchSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter directives, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl AnalyzerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `mixdesk.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AnalyzerError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with MIXDESK_)
        settings = settings.add_source(env);

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(AnalyzerError::Config(
                "fetch.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.fetch.max_bytes == 0 {
            return Err(AnalyzerError::Config(
                "fetch.max_bytes must be greater than zero".to_string(),
            ));
        }

        if self.fetch.user_agent.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "fetch.user_agent must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// HTTP settings for the fetcher
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            max_bytes: self.fetch.max_bytes,
            user_agent: self.fetch.user_agent.clone(),
        }
    }
}

/// `MIXDESK_<SECTION>__<KEY>` environment source
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_fetch() -> FetchSettings {
    FetchSettings {
        timeout_secs: default_timeout_secs(),
        max_bytes: default_max_bytes(),
        user_agent: default_user_agent(),
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_bytes() -> u64 {
    // 2 GiB
    2 * 1024 * 1024 * 1024
}

fn default_user_agent() -> String {
    format!("mixdesk-analyzer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "mixdesk_analyzer=info,mixdesk_analysis=info".to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch: default_fetch(),
            logging: default_logging(),
        }
    }
}
