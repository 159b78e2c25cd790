//! Error types for record loading, saving and field access.

/// Errors raised by the record layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The file could not be read or written.
    #[error("{path}: I/O error: {message}")]
    Io { path: String, message: String },

    /// The file is not valid JSON, or does not have the expected shape.
    #[error("{path}: parse error: {message}")]
    Parse { path: String, message: String },

    #[error("serialization error: {0}")]
    Serialize(String),

    /// A color key is not `#` followed by six hex digits.
    #[error("invalid color `{0}`: expected `#` followed by 6 hex digits")]
    InvalidColor(String),

    /// No free color could be found around a derived color.
    #[error("no unused color left near {0}")]
    ColorSpaceExhausted(String),

    /// A record lacks a field, or the field has the wrong type.
    #[error("material `{material}`: {message}")]
    Field { material: String, message: String },
}

impl DbError {
    pub(crate) fn field(material: &str, message: impl Into<String>) -> Self {
        DbError::Field {
            material: material.to_string(),
            message: message.into(),
        }
    }
}
