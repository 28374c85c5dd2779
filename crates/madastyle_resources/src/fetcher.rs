//! Content sources for cache misses.

use std::future::Future;

use reqwest::Url;

use crate::ResourceError;
use crate::bundled::BundledResources;
use crate::http_client::HttpFetcher;

/// Produces the raw bytes of a resource on a cache miss.
///
/// The two strategies are independent: bundled resources are looked up by
/// logical path, remote ones are downloaded by URL. Neither is retried.
pub trait ContentFetcher {
    /// Reads a resource bundled with the tool.
    fn fetch_bundled(&self, logical_path: &str) -> Result<Vec<u8>, ResourceError>;

    /// Downloads a remote resource.
    fn fetch_remote(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, ResourceError>> + Send;
}

/// Fetcher backed by the compiled-in resource table and an HTTP client.
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    bundled: BundledResources,
    http: HttpFetcher,
}

impl DefaultFetcher {
    /// Create a fetcher over the compiled-in resources with default HTTP settings.
    pub fn new() -> Result<Self, ResourceError> {
        Ok(Self::with_parts(BundledResources::compiled(), HttpFetcher::new()?))
    }

    pub fn with_parts(bundled: BundledResources, http: HttpFetcher) -> Self {
        Self { bundled, http }
    }

    pub fn http(&self) -> &HttpFetcher {
        &self.http
    }
}

impl ContentFetcher for DefaultFetcher {
    fn fetch_bundled(&self, logical_path: &str) -> Result<Vec<u8>, ResourceError> {
        self.bundled.read(logical_path)
    }

    async fn fetch_remote(&self, url: &Url) -> Result<Vec<u8>, ResourceError> {
        self.http.fetch(url).await
    }
}
