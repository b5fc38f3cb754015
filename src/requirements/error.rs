//! Schema violation errors

use thiserror::Error;

/// Data that does not conform to a requirement or choice schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    /// A categorical value outside the field's canonical set.
    #[error("'{value}' is not an allowed value for '{field}'")]
    UnknownValue { field: String, value: String },

    /// A numeric constraint that is negative or not finite.
    #[error("'{field}' must be a non-negative number, got {value}")]
    OutOfRange { field: String, value: f64 },

    /// The payload has the wrong structure or field types.
    #[error("Response does not match the '{schema}' schema: {message}")]
    Shape { schema: String, message: String },
}

impl SchemaViolation {
    pub fn shape(schema: impl Into<String>, message: impl ToString) -> Self {
        SchemaViolation::Shape {
            schema: schema.into(),
            message: message.to_string(),
        }
    }

    /// The offending field, when the violation names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaViolation::UnknownValue { field, .. } | SchemaViolation::OutOfRange { field, .. } => {
                Some(field)
            }
            SchemaViolation::Shape { .. } => None,
        }
    }
}
