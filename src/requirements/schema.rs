//! JSON schema rendering for requirement objects.
//!
//! Schemas are built at request time from the startup canonical sets, so the
//! `enum` lists handed to the model always match the loaded catalogs. Objects
//! list every property as required with a nullable type, which both the
//! `json_object` and strict `json_schema` response modes accept.

use crate::enumeration::CanonicalSet;
use serde_json::{json, Map, Value};

/// Nullable non-negative number.
pub fn number(description: &str) -> Value {
    json!({
        "type": ["number", "null"],
        "minimum": 0,
        "description": description,
    })
}

/// Nullable non-negative integer.
pub fn integer(description: &str) -> Value {
    json!({
        "type": ["integer", "null"],
        "minimum": 0,
        "description": description,
    })
}

/// Nullable boolean.
pub fn boolean(description: &str) -> Value {
    json!({
        "type": ["boolean", "null"],
        "description": description,
    })
}

/// Nullable list drawn from a canonical set.
pub fn enum_list(description: &str, allowed: &CanonicalSet) -> Value {
    let mut items = Map::new();
    items.insert("type".to_string(), json!("string"));
    if !allowed.is_empty() {
        items.insert(
            "enum".to_string(),
            Value::Array(allowed.identifiers().map(|id| json!(id)).collect()),
        );
    }
    json!({
        "type": ["array", "null"],
        "items": Value::Object(items),
        "description": description,
    })
}

/// Object schema with every property required and no extras.
pub fn object(title: &str, description: &str, properties: Vec<(&str, Value)>) -> Value {
    let required: Vec<Value> = properties.iter().map(|(name, _)| json!(name)).collect();
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "object",
        "title": title,
        "description": description,
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
