//! OpenAI-compatible agent implementation (Groq, OpenAI, vLLM, ...).

use super::types::{
    strip_code_blocks, ChatCompletionRequest, ChatCompletionResponse, JsonSchemaFormat, Message,
    ResponseFormat,
};
use super::{AgentError, StructuredAgent, StructuredRequest};
use crate::config::{LlmConfig, ResponseFormatMode};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Structured-output agent over `POST {base_url}/chat/completions`.
///
/// Authenticates with a Bearer API key. In `json_object` mode the schema is
/// appended to the system prompt; in `json_schema` mode it is sent natively
/// with `strict: true`.
pub struct OpenAIAgent {
    /// Human-readable name
    name: String,
    /// Base URL including the version prefix (e.g. "https://api.groq.com/openai/v1")
    base_url: String,
    /// API key for Bearer authentication
    api_key: String,
    model: String,
    temperature: Option<f32>,
    mode: ResponseFormatMode,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAIAgent {
    pub fn new(base_url: String, api_key: String, model: String, client: Arc<Client>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            name: format!("{}@{}", model, base_url),
            base_url,
            api_key,
            model,
            temperature: Some(0.0),
            mode: ResponseFormatMode::JsonObject,
            timeout: Duration::from_secs(60),
            client,
        }
    }

    /// Build an agent from configuration with its own pooled client.
    pub fn from_config(config: &LlmConfig, api_key: String) -> Result<Self, AgentError> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            Arc::new(client),
        )
        .with_temperature(config.temperature)
        .with_mode(config.response_format)
        .with_timeout(timeout))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_mode(mut self, mode: ResponseFormatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_body(&self, request: StructuredRequest) -> ChatCompletionRequest {
        let (system, response_format) = match self.mode {
            ResponseFormatMode::JsonObject => (
                format!(
                    "{}\n\nRespond only with a JSON object matching this JSON schema:\n{}",
                    request.system, request.schema
                ),
                ResponseFormat::JsonObject,
            ),
            ResponseFormatMode::JsonSchema => (
                request.system,
                ResponseFormat::JsonSchema {
                    json_schema: JsonSchemaFormat {
                        name: request.schema_name,
                        strict: true,
                        schema: request.schema,
                    },
                },
            ),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system), Message::user(request.user)],
            temperature: self.temperature,
            response_format,
        }
    }
}

#[async_trait]
impl StructuredAgent for OpenAIAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: StructuredRequest) -> Result<Value, AgentError> {
        let url = format!("{}/chat/completions", self.base_url);
        let schema_name = request.schema_name.clone();
        let body = self.build_body(request);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AgentError::Timeout(timeout_ms)
            } else {
                AgentError::InvalidResponse(format!("Failed to parse completion response: {}", e))
            }
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AgentError::InvalidResponse("Completion has no content".to_string()))?;

        let value = serde_json::from_str(strip_code_blocks(&content)).map_err(|e| {
            AgentError::InvalidResponse(format!(
                "Content for '{}' is not valid JSON: {}",
                schema_name, e
            ))
        })?;

        tracing::debug!(agent = %self.name, schema = %schema_name, "Structured output received");
        Ok(value)
    }
}
