//! Resource cache configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResourceError;
use crate::bundled::BundledResources;
use crate::fetcher::DefaultFetcher;
use crate::http_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_REDIRECTS, HttpFetcher};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration file names looked up in the working directory.
pub const CONFIG_FILES: &[&str] = &[".madastyle.json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Configuration for the resource cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCacheConfig {
    /// Directory below which `mada-data/` is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_root: Option<PathBuf>,

    /// Connect timeout for remote files, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Directory of the configuration file, for resolving relative paths.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,

    /// Platform cache directory captured when the config was created.
    #[serde(skip)]
    default_root: Option<PathBuf>,
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

impl ResourceCacheConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            cache_root: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
            base_dir: None,
            default_root: default_cache_root(),
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&content)?;
        let path = std::path::absolute(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        Ok(config)
    }

    /// Loads the first config file found in `dir`, or defaults if none exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        match CONFIG_FILES.iter().map(|f| dir.join(f)).find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(ConfigError::Validation(format!("{} at {}", e, e.instance_path())));
        }

        let mut config: Self = serde_json::from_value(value)?;
        config.default_root = default_cache_root();
        Ok(config)
    }

    /// Overrides the cache root.
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(root.into());
        self
    }

    /// The effective cache root.
    ///
    /// A relative `cacheRoot` is resolved against the config file's directory.
    /// Without `cacheRoot` the platform cache directory is used, or
    /// `.madastyle-cache` if the platform has none. Whatever is still
    /// relative after that is made absolute against the working directory.
    pub fn cache_root(&self) -> PathBuf {
        let root = match (&self.cache_root, &self.base_dir) {
            (Some(root), Some(base)) if root.is_relative() => base.join(root),
            (Some(root), _) => root.clone(),
            (None, _) => self
                .default_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(".madastyle-cache")),
        };
        std::path::absolute(&root).unwrap_or(root)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Builds the content fetcher described by this configuration.
    pub fn fetcher(&self) -> Result<DefaultFetcher, ResourceError> {
        let http = HttpFetcher::builder()
            .connect_timeout(self.connect_timeout())
            .max_redirects(self.max_redirects)
            .build()?;
        Ok(DefaultFetcher::with_parts(BundledResources::compiled(), http))
    }
}

impl Default for ResourceCacheConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_cache_root() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("madastyle"))
}
