//! Resolution of bundled resources and configuration locations to local files.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::ResourceError;
use crate::checksum_index::ChecksumIndex;
use crate::config::ResourceCacheConfig;
use crate::fetcher::{ContentFetcher, DefaultFetcher};
use crate::hash::url_checksum;
use crate::location::ConfigLocation;
use crate::store::{CacheStore, sanitize_url, split_identifier};

/// Provides configuration resources as local files.
///
/// Bundled resources are keyed by the checksum recorded at build time, remote
/// files by the checksum of their URL. A cached file is reused as long as its
/// validity marker exists; nothing is ever evicted. Temporary files left by
/// a process killed mid-write stay in their checksum directory as well.
///
/// Remote files are keyed by URL only: when the content behind a URL changes,
/// the previously cached copy keeps being served until the URL changes.
pub struct ResourceCache<F = DefaultFetcher> {
    store: CacheStore,
    index: ChecksumIndex,
    fetcher: F,
}

impl ResourceCache<DefaultFetcher> {
    /// Create a cache below `root` over the bundled resources.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ResourceError> {
        Ok(Self::with_parts(
            CacheStore::new(root),
            ChecksumIndex::bundled().clone(),
            DefaultFetcher::new()?,
        ))
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &ResourceCacheConfig) -> Result<Self, ResourceError> {
        Ok(Self::with_parts(
            CacheStore::new(config.cache_root()),
            ChecksumIndex::bundled().clone(),
            config.fetcher()?,
        ))
    }
}

impl<F: ContentFetcher> ResourceCache<F> {
    pub fn with_parts(store: CacheStore, index: ChecksumIndex, fetcher: F) -> Self {
        Self {
            store,
            index,
            fetcher,
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn index(&self) -> &ChecksumIndex {
        &self.index
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns a local file holding the bundled resource `logical_path`.
    ///
    /// The resource is extracted on the first call only; later calls return
    /// the same path without reading the bundle.
    pub fn local_file_for_bundled_resource(
        &self,
        logical_path: &str,
    ) -> Result<PathBuf, ResourceError> {
        let checksum = self.index.lookup(logical_path)?;
        let (namespace, filename) = split_identifier(logical_path);
        let entry = self.store.resolve_path(namespace, checksum, filename)?;

        if self.store.is_valid(&entry) {
            debug!("Already have config file {} : {}", logical_path, entry.target().display());
            return Ok(entry.into_target());
        }

        debug!("Missing config file {}, extracting {}", logical_path, entry.target().display());
        let content = self.fetcher.fetch_bundled(logical_path)?;
        self.store.store(&entry, &content)
    }

    /// Returns a local file for a configuration path or URL.
    ///
    /// Local paths are returned unchanged if they point at a regular file.
    /// `http://` and `https://` URLs are downloaded once and cached by the
    /// checksum of the URL text.
    pub async fn local_file_for_config_path(&self, location: &str) -> Result<PathBuf, ResourceError> {
        let parsed = ConfigLocation::parse(location)?;
        info!("READ config path '{}'", parsed);

        match parsed {
            ConfigLocation::LocalPath(path) => local_file(path),
            ConfigLocation::RemoteUrl(url) => {
                let checksum = url_checksum(location);
                let filename = sanitize_url(location);
                let entry = self.store.resolve_path("", &checksum, &filename)?;

                if self.store.is_valid(&entry) {
                    debug!("Already have remote file {} : {}", location, entry.target().display());
                    return Ok(entry.into_target());
                }

                debug!("Missing remote file {}, fetching to {}", location, entry.target().display());
                let content = self.fetcher.fetch_remote(&url).await?;
                self.store.store(&entry, &content)
            }
        }
    }
}

fn local_file(path: PathBuf) -> Result<PathBuf, ResourceError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ResourceError::InvalidPath { path })
    }
}
