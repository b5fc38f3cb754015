//! Structured logging helpers
//!
//! Filter directive construction, per-request correlation ids, and
//! privacy-aware previews of user text.

pub mod fields;
pub mod middleware;

pub use fields::{extract_status, message_preview};
pub use middleware::{generate_request_id, request_span, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Returns
///
/// A filter string in the format: "base_level,build_advisor::component1=level1,..."
///
/// # Examples
///
/// ```
/// use build_advisor::config::LoggingConfig;
/// use build_advisor::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("extraction".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     component_levels: Some(component_levels),
///     ..Default::default()
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,build_advisor::extraction=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",build_advisor::{}={}", component, level));
        }
    }

    filter_str
}
