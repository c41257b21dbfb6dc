//! Configuration management with layered hierarchy
//!
//! Lowest to highest priority:
//! 1. built-in defaults
//! 2. user config (`<config dir>/runbook/config.yaml`)
//! 3. project config (`.runbook.yaml` in the working directory)
//! 4. environment variables and command-line flags (resolved by clap,
//!    after `.env` has been loaded)

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default global defaults file
pub const DEFAULT_GLOBAL_SYSTEM_FILE: &str = "cmdb/cmdb-global.yaml";

/// Default system file
pub const DEFAULT_SYSTEM_FILE: &str = "cmdb/cmdb.yaml";

/// Default CMDB endpoint
pub const DEFAULT_CMDB_ENDPOINT: &str = "https://cmdb.ft.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".runbook.yaml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("No CMDB API key configured")]
    #[diagnostic(
        code(runbook::config::missing_api_key),
        help("Pass --api-key, set CMDB_API_KEY (a .env file works too), or add api_key to .runbook.yaml")
    )]
    MissingApiKey,

    #[error("Cannot read config file {}", path.display())]
    #[diagnostic(code(runbook::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    #[diagnostic(code(runbook::config::parse))]
    Parse { path: PathBuf, message: String },
}

/// One layer of runbook configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global default values for system information
    pub global_system_file: Option<PathBuf>,

    /// System-specific record
    pub system_file: Option<PathBuf>,

    /// CMDB endpoint (test/prod etc.)
    pub cmdb_endpoint: Option<String>,

    /// CMDB API key
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load the file-based layers, merging in priority order
    ///
    /// Unreadable or malformed config files are skipped with a warning.
    pub fn load() -> Self {
        let mut config = Config::default();

        let mut paths = Vec::new();
        if let Some(global_path) = Self::global_config_path() {
            paths.push(global_path);
        }
        paths.push(PathBuf::from(PROJECT_CONFIG_FILE));

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_file(&path) {
                Ok(layer) => {
                    debug!("Loaded config from {}", path.display());
                    config.merge(layer);
                }
                Err(e) => warn!("{}", e),
            }
        }

        config
    }

    /// Load one config file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the user config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "runbook")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.global_system_file.is_some() {
            self.global_system_file = other.global_system_file;
        }
        if other.system_file.is_some() {
            self.system_file = other.system_file;
        }
        if other.cmdb_endpoint.is_some() {
            self.cmdb_endpoint = other.cmdb_endpoint;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Fill in built-in defaults
    pub fn resolve(self) -> Settings {
        Settings {
            global_system_file: self
                .global_system_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GLOBAL_SYSTEM_FILE)),
            system_file: self
                .system_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_FILE)),
            cmdb_endpoint: self
                .cmdb_endpoint
                .unwrap_or_else(|| DEFAULT_CMDB_ENDPOINT.to_string()),
            api_key: self.api_key.filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub global_system_file: PathBuf,
    pub system_file: PathBuf,
    pub cmdb_endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Settings {
    /// The API key, required for anything that talks to the CMDB
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
