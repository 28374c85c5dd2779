//! Error types for resource resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for a single resource resolution.
///
/// Every variant is terminal for the call that produced it: nothing is
/// retried and nothing is downgraded to a warning.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The checksum index has no entry for a bundled resource.
    #[error("Failed to read {identifier} from data checksums: {index}")]
    MissingChecksum { identifier: String, index: String },

    /// The bundled resource is not part of this build.
    #[error("Bundled resource not found: {0}")]
    ResourceNotFound(String),

    /// Network request failed.
    #[error("Failed to fetch remote file {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to fetch remote file {url}: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The fetch was cancelled before it completed.
    #[error("Cancelled while fetching remote file {url}")]
    Cancelled { url: String },

    /// A local location does not point at a regular file.
    #[error("Provided path '{}' is not a file", path.display())]
    InvalidPath { path: PathBuf },

    /// A location looked like a URL but could not be parsed.
    #[error("Invalid URL '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// Materializing content in the cache failed.
    #[error("Failed to save {} in cache: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Creates a cache write error for `path`.
    pub fn cache_write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error came from the remote fetch itself.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::HttpStatus { .. })
    }

    /// Creates a fetch error for `url`.
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }
}
