//! Playlist sources
//!
//! - [`m3u`]: pure M3U text parser
//! - [`traits`]: the [`PlaylistFetcher`] capability the catalog depends on
//! - [`http`]: reqwest implementation of the fetcher

pub mod http;
pub mod m3u;
pub mod traits;

pub use http::HttpPlaylistFetcher;
pub use m3u::{ParseStats, parse_playlist, parse_playlist_with_stats};
pub use traits::PlaylistFetcher;
