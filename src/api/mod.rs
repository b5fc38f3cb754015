//! # HTTP API
//!
//! Query-string endpoints over the recommendation pipeline.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness greeting
//! - `GET /parrot?message=` - Echo the message back
//! - `GET /extract?message=` - Combined requirements extracted from the message
//! - `GET /recommend?message=` - One chosen component per category
//! - `GET /health` - Uptime and catalog row counts
//! - `GET /enumerations` - Canonical categorical values by category and column
//!
//! ## Example
//!
//! ```no_run
//! use build_advisor::agent::OpenAIAgent;
//! use build_advisor::api::{create_router, AppState};
//! use build_advisor::config::AdvisorConfig;
//! use build_advisor::context::AdvisorContext;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(AdvisorConfig::default());
//! let context = AdvisorContext::load(&config.catalog.dir)?;
//! let agent = Arc::new(OpenAIAgent::from_config(&config.llm, config.llm.api_key()?)?);
//!
//! let state = Arc::new(AppState::new(context, agent, config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All errors share one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "'zen_9' is not an allowed value for 'cpu.microarchitecture'",
//!     "type": "server_error",
//!     "param": "cpu.microarchitecture",
//!     "code": "invalid_model_output"
//!   }
//! }
//! ```

mod catalog;
mod health;
mod pipeline;
pub mod types;

pub use types::*;

use crate::agent::StructuredAgent;
use crate::config::AdvisorConfig;
use crate::context::AdvisorContext;
use crate::recommend::Recommender;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub context: Arc<AdvisorContext>,
    pub config: Arc<AdvisorConfig>,
    pub recommender: Recommender,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Wall-clock startup time reported by `/health`
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        context: Arc<AdvisorContext>,
        agent: Arc<dyn StructuredAgent>,
        config: Arc<AdvisorConfig>,
    ) -> Self {
        let recommender =
            Recommender::new(agent, Arc::clone(&context), config.catalog.shortlist_limit);
        Self {
            context,
            config,
            recommender,
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = state.config.server.cors_allow_any_origin;

    let router = Router::new()
        .route("/", get(pipeline::root))
        .route("/parrot", get(pipeline::parrot))
        .route("/extract", get(pipeline::extract))
        .route("/recommend", get(pipeline::recommend))
        .route("/health", get(health::handle))
        .route("/enumerations", get(catalog::enumerations))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(crate::logging::request_span));

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
