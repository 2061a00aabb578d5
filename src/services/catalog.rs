//! Time-bounded catalog cache
//!
//! [`CatalogCache`] owns the fetch, parse and store cycle for the remote
//! playlist. Callers get the current records through
//! [`CatalogCache::get_channels`], which refreshes the snapshot when it is
//! missing or older than the TTL.
//!
//! # States
//!
//! - **Empty**: no snapshot stored yet
//! - **Fresh**: snapshot younger than the TTL, served without fetching
//! - **Stale**: snapshot reached the TTL, the next caller refreshes it
//!
//! Only successful refreshes are stored. A failed fetch is logged, the caller
//! gets an empty list, and the state is left untouched so the next call tries
//! again.
//!
//! # Concurrency
//!
//! Refreshes are serialized by a mutex. Callers that queued behind a refresh
//! reuse its outcome instead of fetching again. The snapshot is replaced with
//! a single `Arc` swap under the write lock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::{Instant, timeout};
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::errors::{SourceError, SourceResult};
use crate::models::{CacheState, CatalogStatus, ChannelRecord};
use crate::sources::{PlaylistFetcher, parse_playlist_with_stats};

/// Immutable result of one successful fetch and parse
#[derive(Debug)]
pub struct CatalogSnapshot {
    records: Arc<[ChannelRecord]>,
    fetched_at: DateTime<Utc>,
    created: Instant,
}

impl CatalogSnapshot {
    pub fn new(records: Vec<ChannelRecord>) -> Self {
        Self {
            records: records.into(),
            fetched_at: Utc::now(),
            created: Instant::now(),
        }
    }

    pub fn records(&self) -> Arc<[ChannelRecord]> {
        Arc::clone(&self.records)
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

#[derive(Debug, Default)]
struct CacheSlot {
    snapshot: Option<Arc<CatalogSnapshot>>,
    /// Message of the most recent refresh if it failed
    last_error: Option<String>,
    /// Completed refresh attempts, successful or not
    attempts: u64,
}

impl CacheSlot {
    fn fresh_snapshot(&self, ttl: Duration) -> Option<&Arc<CatalogSnapshot>> {
        self.snapshot.as_ref().filter(|snapshot| snapshot.is_fresh(ttl))
    }

    fn state(&self, ttl: Duration) -> CacheState {
        match &self.snapshot {
            None => CacheState::Empty,
            Some(snapshot) if snapshot.is_fresh(ttl) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }
}

fn empty_records() -> Arc<[ChannelRecord]> {
    Arc::from(Vec::new())
}

pub struct CatalogCache {
    fetcher: Arc<dyn PlaylistFetcher>,
    location: String,
    ttl: Duration,
    fetch_timeout: Duration,
    slot: RwLock<CacheSlot>,
    refresh_lock: Mutex<()>,
}

impl CatalogCache {
    pub fn new(fetcher: Arc<dyn PlaylistFetcher>, ttl: Duration, fetch_timeout: Duration) -> Self {
        let location = fetcher.location();
        info!(
            "Catalog cache created for {} (ttl: {}, fetch timeout: {})",
            location,
            humantime::format_duration(ttl),
            humantime::format_duration(fetch_timeout)
        );

        Self {
            fetcher,
            location,
            ttl,
            fetch_timeout,
            slot: RwLock::new(CacheSlot::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn from_config(fetcher: Arc<dyn PlaylistFetcher>, config: &CatalogConfig) -> Self {
        Self::new(fetcher, config.ttl, config.fetch_timeout)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current records, refreshing first when the cache is empty or stale.
    ///
    /// Never fails: when the refresh fails the result is empty.
    pub async fn get_channels(&self) -> Arc<[ChannelRecord]> {
        let observed_attempts = {
            let slot = self.slot.read().await;
            if let Some(snapshot) = slot.fresh_snapshot(self.ttl) {
                return snapshot.records();
            }
            slot.attempts
        };

        let _guard = self.refresh_lock.lock().await;

        {
            let slot = self.slot.read().await;
            if let Some(snapshot) = slot.fresh_snapshot(self.ttl) {
                debug!("Catalog refreshed by a concurrent caller");
                return snapshot.records();
            }
            if slot.attempts != observed_attempts {
                // A refresh finished while this caller waited; share its outcome.
                return match (&slot.last_error, &slot.snapshot) {
                    (None, Some(snapshot)) => snapshot.records(),
                    _ => empty_records(),
                };
            }
        }

        match self.fetch_and_store().await {
            Ok(snapshot) => snapshot.records(),
            Err(_) => empty_records(),
        }
    }

    /// Force a fetch and parse cycle regardless of the snapshot age
    pub async fn refresh(&self) -> SourceResult<Arc<CatalogSnapshot>> {
        let _guard = self.refresh_lock.lock().await;
        self.fetch_and_store().await
    }

    /// Must be called with `refresh_lock` held
    async fn fetch_and_store(&self) -> SourceResult<Arc<CatalogSnapshot>> {
        info!("Refreshing catalog from {}", self.location);
        let started = Instant::now();

        let fetched = match timeout(self.fetch_timeout, self.fetcher.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::timeout(self.location.clone())),
        };

        let outcome = fetched.map(|content| {
            let (records, stats) = parse_playlist_with_stats(&content);
            debug!(
                "Dropped {} metadata lines without URL and {} orphan URLs",
                stats.dropped_metadata, stats.orphan_urls
            );
            Arc::new(CatalogSnapshot::new(records))
        });

        let mut slot = self.slot.write().await;
        slot.attempts += 1;

        match outcome {
            Ok(snapshot) => {
                info!(
                    "Catalog refreshed: {} channels in {}ms",
                    snapshot.records.len(),
                    started.elapsed().as_millis()
                );
                slot.snapshot = Some(Arc::clone(&snapshot));
                slot.last_error = None;
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Failed to refresh catalog from {}: {}", self.location, e);
                slot.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn state(&self) -> CacheState {
        self.slot.read().await.state(self.ttl)
    }

    /// Snapshot currently held, whatever its age
    pub async fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.slot.read().await.snapshot.clone()
    }

    /// Reporting view; never triggers a fetch
    pub async fn status(&self) -> CatalogStatus {
        let slot = self.slot.read().await;

        CatalogStatus {
            state: slot.state(self.ttl),
            channel_count: slot.snapshot.as_ref().map_or(0, |s| s.records.len()),
            fetched_at: slot.snapshot.as_ref().map(|s| s.fetched_at()),
            age_seconds: slot.snapshot.as_ref().map(|s| s.age().as_secs()),
            ttl_seconds: self.ttl.as_secs(),
            last_error: slot.last_error.clone(),
        }
    }
}
