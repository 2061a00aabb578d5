use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when an EXTINF line carries no comma-separated title
pub const DEFAULT_CHANNEL_NAME: &str = "Unknown";

/// Group used when an EXTINF line carries no `group-title` attribute
pub const DEFAULT_GROUP: &str = "General";

/// Separator between atomic categories inside a compound `group`
pub const GROUP_SEPARATOR: char = ';';

/// One entry of the channel catalog.
///
/// Every field is always present. `url` is never empty in records produced by
/// the playlist parser; the other fields fall back to their defaults when the
/// playlist omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub name: String,
    pub logo: String,
    /// Category label, possibly several categories joined by `;`
    pub group: String,
    /// External guide identifier (`tvg-id`)
    pub id: String,
    pub url: String,
}

impl ChannelRecord {
    /// Split the compound `group` into its trimmed, non-empty categories
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.group
            .split(GROUP_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
    }
}

/// Observable state of the catalog cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// No snapshot has been stored yet
    Empty,
    /// A snapshot is stored and younger than the TTL
    Fresh,
    /// A snapshot is stored but has reached the TTL
    Stale,
}

impl CacheState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheState::Empty => "empty",
            CacheState::Fresh => "fresh",
            CacheState::Stale => "stale",
        }
    }
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting view of the catalog cache, served by `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub state: CacheState,
    pub channel_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<u64>,
    pub ttl_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(group: &str) -> ChannelRecord {
        ChannelRecord {
            name: "CNN".to_string(),
            logo: String::new(),
            group: group.to_string(),
            id: String::new(),
            url: "http://stream/cnn".to_string(),
        }
    }

    #[test]
    fn test_categories_split_and_trim() {
        let channel = record("News; Sports ;;  ");
        let categories: Vec<&str> = channel.categories().collect();
        assert_eq!(categories, vec!["News", "Sports"]);
    }

    #[test]
    fn test_channel_record_serializes_all_fields() {
        let value = serde_json::to_value(record("News")).unwrap();
        let object = value.as_object().unwrap();
        for field in ["name", "logo", "group", "id", "url"] {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn test_cache_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CacheState::Fresh).unwrap(),
            "\"fresh\""
        );
        assert_eq!(CacheState::Stale.to_string(), "stale");
    }
}
