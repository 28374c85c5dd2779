//! Madastyle Resource Cache.
//!
//! Materializes bundled and remote configuration resources as files in a
//! checksum-keyed directory tree so that external tools can be pointed at
//! stable local paths.

pub mod bundled;
pub mod checksum_index;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod hash;
pub mod http_client;
pub mod location;
pub mod resolver;
pub mod store;

pub use bundled::BundledResources;
pub use checksum_index::{ChecksumIndex, IndexError};
pub use config::{ConfigError, ResourceCacheConfig};
pub use error::ResourceError;
pub use fetcher::{ContentFetcher, DefaultFetcher};
pub use hash::{ChecksumAlgorithm, UnknownAlgorithm, url_checksum};
pub use http_client::{HttpFetcher, HttpFetcherBuilder};
pub use location::ConfigLocation;
pub use resolver::ResourceCache;
pub use store::{CacheEntry, CacheStore};
