//! CLI utility functions

use madastyle_resources::{ResourceCache, ResourceCacheConfig};
use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the configuration named by `--config`, or the one in the working
/// directory, and applies `--root`.
pub fn load_config(cli: &Cli) -> Result<ResourceCacheConfig> {
    let config = match &cli.config {
        Some(path) => ResourceCacheConfig::from_file(path).into_diagnostic()?,
        None => {
            let cwd = std::env::current_dir().into_diagnostic()?;
            ResourceCacheConfig::discover(cwd).into_diagnostic()?
        }
    };

    let config = match &cli.root {
        Some(root) => config.with_cache_root(std::path::absolute(root).into_diagnostic()?),
        None => config,
    };

    debug!("Using cache root {}", config.cache_root().display());
    Ok(config)
}

pub fn open_cache(cli: &Cli) -> Result<ResourceCache> {
    let config = load_config(cli)?;
    ResourceCache::from_config(&config).into_diagnostic()
}
