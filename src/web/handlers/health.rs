//! Health and status handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{models::CatalogStatus, web::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness check; does not touch the catalog
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Report the catalog cache state without triggering a fetch
pub async fn catalog_status(State(state): State<AppState>) -> Json<CatalogStatus> {
    Json(state.channel_service.status().await)
}
