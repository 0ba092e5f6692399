//! Configuration module for atelier
//!
//! Settings are read from `<config_dir>/atelier/config.toml` and can be
//! overridden per variable from the environment, e.g.
//! `ATELIER_API__BASE_URL=https://studio.example` or `ATELIER_PAGE_SIZE=24`.
//! A missing file is not an error: every field has a default.

mod setup;

pub use setup::first_time_setup;

use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use crate::auth::AdminAllowlist;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Base URL of the upload CDN that serves files by object key
pub const DEFAULT_CDN_BASE: &str = "https://utfs.io/f";

const ENV_PREFIX: &str = "ATELIER";

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_cdn_base() -> String {
    DEFAULT_CDN_BASE.to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_fetch_limit() -> u32 {
    100
}

const fn default_max_dimension() -> u32 {
    2000
}

const fn default_quality() -> u8 {
    85
}

/// Where the content API lives and how to talk to it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Site origin; requests go to `{base_url}/api/...`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: None,
        }
    }
}

/// Image preparation before upload
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Longest side in pixels after downscaling
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// JPEG quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            quality: default_quality(),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AtelierConfig {
    /// CDN prefix for media stored by object key
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,

    /// Items per page in media listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Documents requested per call when loading the library
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Location of the local document store
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Comma-separated admin email addresses
    #[serde(default)]
    pub admin_emails: String,

    /// Email of the signed-in admin
    #[serde(default)]
    pub identity: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Log filter used when neither `--verbose` nor `RUST_LOG` is given
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub compression: CompressionConfig,
}

impl Default for AtelierConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cdn_base: default_cdn_base(),
            page_size: default_page_size(),
            fetch_limit: default_fetch_limit(),
            store_path: None,
            admin_emails: String::new(),
            identity: None,
            quiet: false,
            log_level: None,
            compression: CompressionConfig::default(),
        }
    }
}

impl AtelierConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("atelier").join("config.toml"))
    }

    /// Environment source: `ATELIER_` prefix, `__` between nested keys
    #[must_use]
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration from the default location plus the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, Self::environment())
    }

    /// Load configuration from `path` layered with `env`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the
    /// wrong type.
    pub fn load_from(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be at least 1".to_string()));
        }
        if !(1..=100).contains(&self.compression.quality) {
            return Err(ConfigError::Message(format!(
                "compression.quality must be between 1 and 100, got {}",
                self.compression.quality
            )));
        }
        Ok(self)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Local store location, defaulting to the user's data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("atelier").join("store"))
    }

    /// The configured admin allowlist
    #[must_use]
    pub fn allowlist(&self) -> AdminAllowlist {
        AdminAllowlist::from_csv(&self.admin_emails)
    }
}
