//! Channel query service
//!
//! The query interface consumed by the web layer. Every call reads the
//! current catalog through the cache, then filters or aggregates it.

use std::sync::Arc;

use tracing::debug;

use super::catalog::CatalogCache;
use super::channel_query::{ChannelFilter, filter_channels, list_categories};
use crate::models::{CatalogStatus, ChannelRecord};

#[derive(Clone)]
pub struct ChannelService {
    catalog: Arc<CatalogCache>,
}

impl ChannelService {
    pub fn new(catalog: Arc<CatalogCache>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<CatalogCache> {
        &self.catalog
    }

    pub async fn list_channels(&self, filter: &ChannelFilter) -> Vec<ChannelRecord> {
        let records = self.catalog.get_channels().await;
        let channels = filter_channels(&records, filter);
        debug!(
            "Filter {:?} matched {} of {} channels",
            filter,
            channels.len(),
            records.len()
        );
        channels
    }

    pub async fn list_categories(&self) -> Vec<String> {
        let records = self.catalog.get_channels().await;
        list_categories(&records)
    }

    pub async fn status(&self) -> CatalogStatus {
        self.catalog.status().await
    }
}
