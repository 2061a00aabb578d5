//! Service layer
//!
//! - [`catalog`]: the time-bounded, single-flight catalog cache
//! - [`channel_query`]: pure filtering and category extraction
//! - [`channel`]: the query interface used by HTTP handlers

pub mod catalog;
pub mod channel;
pub mod channel_query;

pub use catalog::{CatalogCache, CatalogSnapshot};
pub use channel::ChannelService;
pub use channel_query::{ChannelFilter, filter_channels, list_categories};
