//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub model: String,
    /// Rows loaded per catalog.
    pub catalogs: BTreeMap<String, usize>,
}

/// GET /health - Return service status.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let catalogs: BTreeMap<String, usize> = state
        .context
        .catalogs
        .row_counts()
        .into_iter()
        .map(|(category, rows)| (category.to_string(), rows))
        .collect();

    let status = if catalogs.values().all(|&rows| rows > 0) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        started_at: state.started_at,
        model: state.config.llm.model.clone(),
        catalogs,
    })
}
