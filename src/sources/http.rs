//! HTTP playlist fetcher backed by reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::traits::PlaylistFetcher;
use crate::config::CatalogConfig;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::utils::UrlUtils;

/// Fetches the playlist with a single GET request
pub struct HttpPlaylistFetcher {
    client: Client,
    url: String,
}

impl HttpPlaylistFetcher {
    /// Build a fetcher from the catalog settings
    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        Self::new(
            config.playlist_url.clone(),
            config.fetch_timeout,
            config.connect_timeout,
            &config.user_agent,
        )
    }

    pub fn new(
        url: String,
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    fn map_request_error(&self, error: reqwest::Error) -> SourceError {
        let url = UrlUtils::obfuscate_credentials(&self.url);
        if error.is_timeout() {
            SourceError::timeout(url)
        } else {
            let message = UrlUtils::obfuscate_credentials(&error.to_string());
            SourceError::network(url, message)
        }
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch(&self) -> SourceResult<String> {
        debug!("Fetching playlist from: {}", self.location());

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let content = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::timeout(self.location())
            } else {
                SourceError::decode(format!("Failed to read response: {e}"))
            }
        })?;

        info!(
            "Fetched {} bytes of playlist content from {}",
            content.len(),
            self.location()
        );
        Ok(content)
    }

    fn location(&self) -> String {
        UrlUtils::obfuscate_credentials(&self.url)
    }
}
