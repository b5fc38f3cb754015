//! Structured-output provider configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the JSON schema is conveyed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatMode {
    /// `response_format: {"type": "json_object"}` with the schema in the system prompt.
    #[default]
    JsonObject,
    /// `response_format: {"type": "json_schema", ...}` with strict schema enforcement.
    JsonSchema,
}

impl FromStr for ResponseFormatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json_object" => Ok(ResponseFormatMode::JsonObject),
            "json_schema" => Ok(ResponseFormatMode::JsonSchema),
            _ => Err(format!("Invalid response format: {}", s)),
        }
    }
}

/// OpenAI-compatible chat completions endpoint used for extraction and selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub response_format: ResponseFormatMode,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "GROQ_KEY".to_string(),
            timeout_seconds: 60,
            temperature: 0.0,
            response_format: ResponseFormatMode::JsonObject,
        }
    }
}

impl LlmConfig {
    /// Read the API key from `api_key_env`.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}
