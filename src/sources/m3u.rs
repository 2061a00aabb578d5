//! M3U playlist parser
//!
//! Turns raw playlist text into an ordered list of [`ChannelRecord`]s. The
//! parser never fails: lines it cannot use are skipped, missing attributes
//! take their defaults.
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-id="CNN.us" tvg-logo="http://x/l.png" group-title="News",CNN
//! http://stream/cnn
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{ChannelRecord, DEFAULT_CHANNEL_NAME, DEFAULT_GROUP};

const EXTINF_PREFIX: &str = "#EXTINF:";
const URL_PREFIX: &str = "http";

static TVG_ID: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("tvg-id"));
static TVG_LOGO: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("tvg-logo"));
static GROUP_TITLE: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("group-title"));

fn attribute_pattern(key: &str) -> Regex {
    Regex::new(&format!(r#"{}="([^"]*)""#, regex::escape(key)))
        .expect("attribute pattern is a valid regex")
}

/// Counters collected during a parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records emitted
    pub channels: usize,
    /// EXTINF lines never followed by a URL line
    pub dropped_metadata: usize,
    /// URL lines with no pending EXTINF line
    pub orphan_urls: usize,
}

/// A record whose EXTINF line has been seen but whose URL line has not
struct PendingChannel {
    name: String,
    id: String,
    logo: String,
    group: String,
}

impl PendingChannel {
    fn from_extinf(line: &str) -> Self {
        let (params, name) = match line.split_once(',') {
            Some((params, name)) => (params, name.to_string()),
            None => (line, DEFAULT_CHANNEL_NAME.to_string()),
        };

        Self {
            name,
            id: capture(&TVG_ID, params).unwrap_or_default(),
            logo: capture(&TVG_LOGO, params).unwrap_or_default(),
            group: capture(&GROUP_TITLE, params).unwrap_or_else(|| DEFAULT_GROUP.to_string()),
        }
    }

    fn finish(self, url: &str) -> ChannelRecord {
        ChannelRecord {
            name: self.name,
            logo: self.logo,
            group: self.group,
            id: self.id,
            url: url.to_string(),
        }
    }
}

fn capture(pattern: &Regex, params: &str) -> Option<String> {
    pattern
        .captures(params)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
}

/// Parse playlist text into channel records, in source order
pub fn parse_playlist(content: &str) -> Vec<ChannelRecord> {
    parse_playlist_with_stats(content).0
}

/// Parse playlist text and report what was kept and what was skipped
pub fn parse_playlist_with_stats(content: &str) -> (Vec<ChannelRecord>, ParseStats) {
    let mut channels = Vec::new();
    let mut stats = ParseStats::default();
    let mut pending: Option<PendingChannel> = None;

    for line in content.split('\n') {
        let line = line.trim();

        if line.starts_with(EXTINF_PREFIX) {
            if pending.replace(PendingChannel::from_extinf(line)).is_some() {
                stats.dropped_metadata += 1;
            }
        } else if line.starts_with(URL_PREFIX) {
            match pending.take() {
                Some(channel) => channels.push(channel.finish(line)),
                None => stats.orphan_urls += 1,
            }
        }
    }

    if pending.is_some() {
        stats.dropped_metadata += 1;
    }
    stats.channels = channels.len();

    debug!(
        "Parsed {} channels ({} metadata lines without URL, {} orphan URLs)",
        stats.channels, stats.dropped_metadata, stats.orphan_urls
    );

    (channels, stats)
}
