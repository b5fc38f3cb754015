//! Structured-output agent abstraction.
//!
//! Extraction and selection both reduce to one operation: send a system
//! prompt, a user message and a JSON schema, get back a JSON value. The
//! [`StructuredAgent`] trait captures that so the pipeline can run against a
//! real provider or a scripted stand-in in tests.

use async_trait::async_trait;
use serde_json::Value;

pub mod error;
pub mod openai;
pub mod types;

pub use error::AgentError;
pub use openai::OpenAIAgent;
pub use types::Message;

/// One structured-output call.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Schema name, used as the `json_schema.name` and in logs.
    pub schema_name: String,
    pub schema: Value,
    pub system: String,
    pub user: String,
}

impl StructuredRequest {
    pub fn new(
        schema_name: impl Into<String>,
        schema: Value,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            schema,
            system: system.into(),
            user: user.into(),
        }
    }
}

/// A service that turns text into a JSON value shaped by a schema.
///
/// Used as `Arc<dyn StructuredAgent>`. The returned value is only
/// syntactically JSON; callers validate it against their own types.
#[async_trait]
pub trait StructuredAgent: Send + Sync + 'static {
    /// Human-readable name for logging (e.g. "groq:llama-3.1-8b-instant").
    fn name(&self) -> &str;

    /// Execute one structured-output request.
    ///
    /// # Returns
    ///
    /// - `Ok(Value)` with the parsed JSON content of the first choice
    /// - `Err(AgentError::Upstream)` if the provider returned an error status
    /// - `Err(AgentError::Network)` if the connection failed
    /// - `Err(AgentError::Timeout)` if the request exceeded its deadline
    /// - `Err(AgentError::InvalidResponse)` if the content is missing or not JSON
    async fn generate(&self, request: StructuredRequest) -> Result<Value, AgentError>;
}
