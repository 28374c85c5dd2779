//! HTTP client for remote configuration files.

use std::time::Duration;

use reqwest::{Client, Url, redirect};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ResourceError;

/// Default connect timeout for remote fetches.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default maximum number of redirects.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Plain HTTP GET client following redirects.
///
/// Only the connect phase is bounded. A server that accepts the connection and
/// then stalls keeps the caller waiting until the cancellation token fires.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    cancel: CancellationToken,
}

/// Builder for HttpFetcher.
#[derive(Debug)]
pub struct HttpFetcherBuilder {
    connect_timeout: Duration,
    max_redirects: usize,
    cancel: CancellationToken,
}

impl HttpFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Result<Self, ResourceError> {
        Self::builder().build()
    }

    /// Create a new builder for HttpFetcher.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts in-flight fetches when cancelled.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetch the body of `url`.
    ///
    /// Non-success status codes are reported as errors so an error page never
    /// ends up in the cache. The token is left cancelled when a fetch is
    /// aborted, so the caller still sees the signal.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ResourceError> {
        if self.cancel.is_cancelled() {
            return Err(ResourceError::Cancelled {
                url: url.to_string(),
            });
        }

        info!("Get {}", url);

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Fetch of {} cancelled", url);
                Err(ResourceError::Cancelled { url: url.to_string() })
            }
            result = self.get_bytes(url) => result,
        }
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, ResourceError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ResourceError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResourceError::fetch(url.as_str(), e))?;

        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

impl HttpFetcherBuilder {
    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set maximum number of redirects.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Use an existing cancellation token.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Build the HttpFetcher.
    pub fn build(self) -> Result<HttpFetcher, ResourceError> {
        let policy = if self.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(self.max_redirects)
        };

        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .redirect(policy)
            .build()
            .map_err(ResourceError::ClientBuild)?;

        Ok(HttpFetcher {
            client,
            cancel: self.cancel,
        })
    }
}
