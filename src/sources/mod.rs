//! Source retrieval
//!
//! Playlist and guide documents come from http(s) URLs or local paths. The
//! [`ResourceFetcher`] trait is the seam the aggregator uses so tests can
//! substitute in-memory documents for the network.

use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, info};
use url::Url;

use crate::errors::{AppResult, SourceError};

/// Retrieves the raw text of a source document.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> AppResult<String>;
}

/// Fetcher for http(s) URLs and local file paths.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: Option<String>,
}

impl HttpFetcher {
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent,
        }
    }

    /// True when `location` is a remote URL rather than a local path.
    fn is_remote(location: &str) -> bool {
        matches!(
            Url::parse(location).map(|u| u.scheme().to_string()),
            Ok(scheme) if scheme == "http" || scheme == "https"
        )
    }

    async fn fetch_remote(&self, location: &str) -> AppResult<String> {
        let mut request = self.client.get(location);
        if let Some(user_agent) = &self.user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: response.status().as_u16(),
                url: location.to_string(),
            }
            .into());
        }

        let total_size = response.content_length();
        debug!(
            "Connected to {}, content length: {:?} bytes",
            location, total_size
        );

        let content = collect_utf8(response.bytes_stream(), location).await?;
        info!(
            "Download completed for {}: {} bytes",
            location,
            content.len()
        );
        Ok(content)
    }
}

/// Accumulate a chunked download and decode it as UTF-8 once at the end, so
/// multi-byte characters split across chunk boundaries stay intact. Logs
/// progress roughly every mebibyte so large documents do not stall silently.
async fn collect_utf8<S, C, E>(mut stream: S, location: &str) -> Result<String, E>
where
    S: futures::Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
{
    let mut body: Vec<u8> = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        let chunk = chunk.as_ref();

        body.extend_from_slice(chunk);
        if (body.len() as u64) % (1 << 20) < chunk.len() as u64 {
            debug!("Downloaded {} bytes from {}", body.len(), location);
        }
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> AppResult<String> {
        if Self::is_remote(location) {
            self.fetch_remote(location).await
        } else {
            Ok(tokio::fs::read_to_string(location).await?)
        }
    }
}
