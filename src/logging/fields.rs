//! Field extraction helpers for structured logging

use crate::api::ApiError;
use crate::config::LoggingConfig;

/// Status and error message of a handler result.
///
/// - For Ok results: ("success", None)
/// - For Err results: (error_type, Some(error_message))
pub fn extract_status<T>(result: &Result<T, ApiError>) -> (String, Option<String>) {
    match result {
        Ok(_) => ("success".to_string(), None),
        Err(e) => (e.error.r#type.clone(), Some(e.error.message.clone())),
    }
}

/// Preview of user text for logs, or `None` when content logging is off.
///
/// # Examples
///
/// ```
/// use build_advisor::config::LoggingConfig;
/// use build_advisor::logging::message_preview;
///
/// let config = LoggingConfig {
///     enable_content_logging: true,
///     content_log_max_chars: 5,
///     ..Default::default()
/// };
/// assert_eq!(message_preview("quiet gaming rig", &config).as_deref(), Some("quiet..."));
/// assert_eq!(message_preview("quiet gaming rig", &LoggingConfig::default()), None);
/// ```
pub fn message_preview(text: &str, config: &LoggingConfig) -> Option<String> {
    if !config.enable_content_logging || text.is_empty() {
        return None;
    }
    Some(truncate_chars(text, config.content_log_max_chars))
}

/// Truncate on a character boundary, marking the cut with `...`.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}
