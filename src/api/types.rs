//! Request, response and error types for the HTTP API.

use crate::agent::AgentError;
use crate::extraction::ExtractionError;
use crate::recommend::RecommendError;
use crate::requirements::SchemaViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// `?message=` query string shared by every text endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageQuery {
    pub message: Option<String>,
}

impl MessageQuery {
    /// The message as given, blank included. Only an absent parameter is a 400.
    pub fn present(self) -> Result<String, ApiError> {
        self.message.ok_or_else(|| ApiError::missing_param("message"))
    }

    /// A non-blank message, or a 400 naming the parameter.
    pub fn require(self) -> Result<String, ApiError> {
        match self.present()? {
            message if message.trim().is_empty() => Err(ApiError::missing_param("message")),
            message => Ok(message),
        }
    }
}

/// `{"message": ...}` body returned by `/` and `/parrot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: String, r#type: &str, param: Option<String>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message,
                r#type: r#type.to_string(),
                param,
                code: Some(code.to_string()),
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(message.to_string(), "invalid_request_error", None, "invalid_request_error")
    }

    /// Required query parameter missing (400).
    pub fn missing_param(param: &str) -> Self {
        Self::new(
            format!("Missing required query parameter '{}'", param),
            "invalid_request_error",
            Some(param.to_string()),
            "invalid_request_error",
        )
    }

    /// Model output did not match the expected schema (502).
    pub fn invalid_model_output(violation: &SchemaViolation) -> Self {
        Self::new(
            violation.to_string(),
            "server_error",
            violation.field().map(str::to_string),
            "invalid_model_output",
        )
    }

    /// Create a bad gateway error (502).
    pub fn bad_gateway(message: &str) -> Self {
        Self::new(message.to_string(), "server_error", None, "bad_gateway")
    }

    /// Create a gateway timeout error (504).
    pub fn gateway_timeout() -> Self {
        Self::new(
            "Model provider request timed out".to_string(),
            "server_error",
            None,
            "gateway_timeout",
        )
    }

    /// The whole request outlived the server deadline (504).
    pub fn deadline_exceeded(seconds: u64) -> Self {
        Self::new(
            format!("Request did not complete within {}s", seconds),
            "server_error",
            None,
            "gateway_timeout",
        )
    }

    /// Server-side misconfiguration (500).
    pub fn internal(message: &str) -> Self {
        Self::new(message.to_string(), "server_error", None, "internal_error")
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("invalid_model_output") | Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SchemaViolation> for ApiError {
    fn from(violation: SchemaViolation) -> Self {
        ApiError::invalid_model_output(&violation)
    }
}

impl From<AgentError> for ApiError {
    fn from(error: AgentError) -> Self {
        match error {
            AgentError::Timeout(_) => ApiError::gateway_timeout(),
            AgentError::Configuration(message) => ApiError::internal(&message),
            other => ApiError::bad_gateway(&other.to_string()),
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::Schema(violation) => violation.into(),
            ExtractionError::Agent(agent) => agent.into(),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(error: RecommendError) -> Self {
        match error {
            RecommendError::Extraction(e) => e.into(),
            RecommendError::Selection(e) => e.into(),
            RecommendError::InvalidSelection(v) => v.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
