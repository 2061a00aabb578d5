//! Channel browser API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::info;

use crate::{models::ChannelRecord, services::ChannelFilter, web::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ChannelsQuery {
    /// Exact group to match
    pub category: Option<String>,
    /// Search term for channel name or group
    pub search: Option<String>,
}

/// List channels, optionally filtered by category and search term
pub async fn list_channels(
    State(state): State<AppState>,
    Query(params): Query<ChannelsQuery>,
) -> Json<Vec<ChannelRecord>> {
    info!("GET /api/channels");
    let filter = ChannelFilter::new(params.category, params.search);
    let channels = state.channel_service.list_channels(&filter).await;
    info!("Returning {} channels", channels.len());
    Json(channels)
}

/// List the distinct atomic categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    info!("GET /api/categories");
    let categories = state.channel_service.list_categories().await;
    info!("Returning {} atomic categories", categories.len());
    Json(categories)
}
