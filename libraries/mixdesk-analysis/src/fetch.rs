//! Raw byte fetchers
//!
//! - [`HttpFetcher`]: streamed HTTP(S) download with a size limit
//! - [`FileFetcher`]: local paths and `file://` URLs
//! - [`SourceFetcher`]: picks one of the two from the source string
//!
//! All of them race the transfer against the cancellation token, so a
//! cancelled fetch drops the in-flight request.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use mixdesk_core::{AudioFetcher, CancellationToken, MixdeskError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP fetch settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Largest body accepted, in bytes
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            max_bytes: 2 * 1024 * 1024 * 1024,
            user_agent: format!("mixdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches audio over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    max_bytes: u64,
}

impl HttpFetcher {
    /// Build a client from `options`
    ///
    /// # Errors
    /// Returns a fetch error if the HTTP client cannot be built
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| MixdeskError::fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            max_bytes: options.max_bytes,
        })
    }

    async fn download(&self, url: &str) -> Result<Bytes> {
        debug!(url = %url, "Fetching audio");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MixdeskError::fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MixdeskError::fetch(format!(
                "HTTP {} from {}",
                status.as_u16(),
                url
            )));
        }

        let declared = response.content_length();
        if let Some(length) = declared {
            if length > self.max_bytes {
                return Err(self.too_large(url));
            }
        }

        let capacity = declared.unwrap_or(0).min(self.max_bytes) as usize;
        let mut body = BytesMut::with_capacity(capacity);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| MixdeskError::fetch(format!("Reading {} failed: {}", url, e)))?;
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, size = body.len(), "Audio fetched");
        Ok(body.freeze())
    }

    fn too_large(&self, url: &str) -> MixdeskError {
        MixdeskError::fetch(format!(
            "{} is larger than the {} byte limit",
            url, self.max_bytes
        ))
    }
}

#[async_trait]
impl AudioFetcher for HttpFetcher {
    async fn fetch(&self, source: &str, cancel: &CancellationToken) -> Result<Bytes> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(MixdeskError::Cancelled),
            result = self.download(source) => result,
        }
    }
}

/// Reads audio from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

impl FileFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioFetcher for FileFetcher {
    async fn fetch(&self, source: &str, cancel: &CancellationToken) -> Result<Bytes> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        debug!(path = %path, "Reading audio file");

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(MixdeskError::Cancelled),
            result = tokio::fs::read(path) => match result {
                Ok(data) => Ok(Bytes::from(data)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(MixdeskError::not_found("Audio file", path))
                }
                Err(e) => Err(MixdeskError::fetch(format!("Reading {} failed: {}", path, e))),
            },
        }
    }
}

/// Fetches `http://` and `https://` sources over HTTP, everything else from disk
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    /// # Errors
    /// Returns a fetch error if the HTTP client cannot be built
    pub fn new(options: &FetchOptions) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(options)?,
            file: FileFetcher::new(),
        })
    }
}

/// Whether `source` should be fetched over HTTP
pub fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl AudioFetcher for SourceFetcher {
    async fn fetch(&self, source: &str, cancel: &CancellationToken) -> Result<Bytes> {
        if is_remote(source) {
            self.http.fetch(source, cancel).await
        } else {
            self.file.fetch(source, cancel).await
        }
    }
}
