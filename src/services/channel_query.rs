//! Filtering and category extraction over catalog records

use std::collections::BTreeSet;

use crate::models::ChannelRecord;

/// Optional filters for channel listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    /// Exact, case-sensitive match against the whole `group` field
    pub category: Option<String>,
    /// Case-insensitive substring of `name` or `group`
    pub search: Option<String>,
}

impl ChannelFilter {
    /// Build a filter from raw query values; empty strings count as absent
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            search: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }
}

/// Records matching every filter that is set, in catalog order
pub fn filter_channels(records: &[ChannelRecord], filter: &ChannelFilter) -> Vec<ChannelRecord> {
    let search = filter.search.as_deref().map(str::to_lowercase);

    records
        .iter()
        .filter(|channel| {
            filter
                .category
                .as_deref()
                .is_none_or(|category| channel.group == category)
        })
        .filter(|channel| {
            search.as_deref().is_none_or(|term| {
                channel.name.to_lowercase().contains(term)
                    || channel.group.to_lowercase().contains(term)
            })
        })
        .cloned()
        .collect()
}

/// Distinct atomic categories across all records, sorted ascending
pub fn list_categories(records: &[ChannelRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|channel| channel.categories())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
