//! Catalog introspection handlers.

use crate::api::AppState;
use crate::enumeration::Enumerations;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /enumerations - Canonical value sets, `{category: {column: {id: display}}}`.
pub async fn enumerations(State(state): State<Arc<AppState>>) -> Json<Enumerations> {
    Json(state.context.enumerations.clone())
}
