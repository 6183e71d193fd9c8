//! Remote playlist source handling
//!
//! Fetching sits behind a trait so the merge pipeline can be driven by an
//! in-memory fetcher in tests.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::errors::SourceError;

/// Fetches one remote playlist document as text
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceConfig) -> Result<String, SourceError>;
}

/// HTTP fetcher backed by a shared reqwest client
pub struct HttpPlaylistFetcher {
    client: Client,
}

impl HttpPlaylistFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder().user_agent("m3u-merge/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch(&self, source: &SourceConfig) -> Result<String, SourceError> {
        info!("Fetching playlist source '{}': {}", source.name, source.url);

        let response = self
            .client
            .get(&source.url)
            .send()
            .await
            .map_err(|e| SourceError::request_failed(&source.url, &e))?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: response.status().as_u16(),
                url: source.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::request_failed(&source.url, &e))?;

        debug!(
            "Fetched {} bytes from source '{}'",
            body.len(),
            source.name
        );
        Ok(body)
    }
}

impl Default for HttpPlaylistFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}
