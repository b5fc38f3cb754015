//! Handlers for the text endpoints.

use crate::api::{ApiError, AppState, MessageQuery, MessageResponse};
use crate::logging::{extract_status, message_preview};
use crate::recommend::ComponentChoices;
use crate::requirements::PcRequirements;
use axum::{
    extract::{Query, State},
    Json,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run `work` under `server.request_timeout_seconds`; overruns become a 504.
async fn within_deadline<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let seconds = state.config.server.request_timeout_seconds;
    match tokio::time::timeout(Duration::from_secs(seconds), work).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_seconds = seconds, "Request deadline exceeded");
            Err(ApiError::deadline_exceeded(seconds))
        }
    }
}

/// GET / - Liveness greeting.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "hello world".to_string(),
    })
}

/// GET /parrot - Echo the message, even an empty one.
pub async fn parrot(Query(query): Query<MessageQuery>) -> Result<Json<MessageResponse>, ApiError> {
    let message = query.present()?;
    Ok(Json(MessageResponse { message }))
}

/// GET /extract - Requirements extracted from the message.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<PcRequirements>, ApiError> {
    let message = query.require()?;
    if let Some(preview) = message_preview(&message, &state.config.logging) {
        tracing::info!(message = %preview, "Extract request");
    }

    let result = within_deadline(&state, async {
        state
            .recommender
            .extractor()
            .extract(&message)
            .await
            .map_err(ApiError::from)
    })
    .await;

    let (status, error) = extract_status(&result);
    tracing::info!(status = %status, error = ?error, "Extraction finished");
    result.map(Json)
}

/// GET /recommend - One chosen component per category.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<ComponentChoices>, ApiError> {
    let message = query.require()?;
    if let Some(preview) = message_preview(&message, &state.config.logging) {
        tracing::info!(message = %preview, "Recommend request");
    }

    let result = within_deadline(&state, async {
        state.recommender.recommend(&message).await.map_err(ApiError::from)
    })
    .await;

    let (status, error) = extract_status(&result);
    tracing::info!(status = %status, error = ?error, "Recommendation finished");
    result.map(Json)
}
