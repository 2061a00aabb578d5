//! Searchable channel catalog backed by a remote M3U playlist.
//!
//! The playlist is fetched on demand, parsed into [`models::ChannelRecord`]s
//! and cached for a configurable TTL. Queries filter the cached records by
//! category and search term.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
pub mod web;
