//! Source abstraction used by the catalog cache

use async_trait::async_trait;

use crate::errors::SourceResult;

/// Retrieves the raw playlist document from its fixed location.
///
/// Implementations must report network failures, timeouts and non-success
/// status codes as errors, never as empty text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch the full playlist body as text
    async fn fetch(&self) -> SourceResult<String>;

    /// Location being fetched, for logging
    fn location(&self) -> String;
}
