//! Configuration file management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use twwx_core::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT};

/// Environment variable holding the CWA API key.
pub const API_KEY_ENV: &str = "TWWX_API_KEY";

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed settings.
    pub feed: FeedConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Retention settings.
    pub retention: RetentionConfig,
}

impl Config {
    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return every problem found.
    ///
    /// # Example
    ///
    /// ```
    /// use twwx_cli::config::Config;
    ///
    /// let config = Config::default();
    /// config.validate().expect("Default config should be valid");
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.feed.validate());
        errors.extend(self.storage.validate());
        errors.extend(self.retention.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.feed.api_key.is_some() {
            copy.feed.api_key = Some("********".to_string());
        }
        copy
    }
}

/// Feed settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Dataset endpoint.
    pub url: String,
    /// CWA open data API key. Prefer the `TWWX_API_KEY` variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.url.trim().is_empty() {
            errors.push(ValidationError {
                field: "feed.url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            errors.push(ValidationError {
                field: "feed.url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.url),
            });
        }

        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            errors.push(ValidationError {
                field: "feed.api_key".to_string(),
                message: "API key cannot be empty (remove the entry instead)".to_string(),
            });
        }

        if !(1..=600).contains(&self.timeout_secs) {
            errors.push(ValidationError {
                field: "feed.timeout_secs".to_string(),
                message: format!(
                    "timeout must be between 1 and 600 seconds, got {}",
                    self.timeout_secs
                ),
            });
        }

        errors
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Some(path) = &self.path
            && path.as_os_str().is_empty()
        {
            errors.push(ValidationError {
                field: "storage.path".to_string(),
                message: "database path cannot be empty".to_string(),
            });
        }
        errors
    }

    /// Configured database path, or the platform default.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(twwx_store::default_db_path)
    }
}

/// Retention settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Records older than this many days are pruned.
    pub days: u32,
    /// Prune after every `run`, not only when `--prune` is given.
    pub prune_after_run: bool,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: 7,
            prune_after_run: false,
        }
    }
}

impl RetentionConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.days == 0 {
            errors.push(ValidationError {
                field: "retention.days".to_string(),
                message: "retention must be at least 1 day".to_string(),
            });
        }
        errors
    }
}

/// Errors from loading, saving or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field path (e.g., `feed.url`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("twwx")
        .join("config.toml")
}

/// Pick the API key: explicit argument, then config file.
///
/// The environment variable is folded into the argument by clap.
pub fn resolve_api_key(arg: Option<String>, config: &Config) -> Option<String> {
    arg.filter(|k| !k.trim().is_empty())
        .or_else(|| config.feed.api_key.clone())
}
