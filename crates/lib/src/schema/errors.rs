//! Error types for schema registration and sanitization.

use thiserror::Error;

use super::Kind;

/// Structured error types for schema operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A declaration was malformed (most commonly: no semantic type)
    #[error("invalid declaration for attribute '{path}': {reason}")]
    InvalidDeclaration { path: String, reason: String },

    /// A declared path extends through an already-declared scalar leaf
    #[error("attribute '{path}' collides with declared leaf '{leaf}'")]
    PathCollision { path: String, leaf: String },

    /// A raw value could not be coerced to its declared kind
    #[error("cannot sanitize {actual} value into {kind}")]
    Sanitize { kind: Kind, actual: String },
}

impl SchemaError {
    /// Check if this error arose at declaration/registration time
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            SchemaError::InvalidDeclaration { .. } | SchemaError::PathCollision { .. }
        )
    }

    /// Check if this error arose during value sanitization
    pub fn is_sanitize_error(&self) -> bool {
        matches!(self, SchemaError::Sanitize { .. })
    }

    /// Get the attribute path if this is a declaration-time error
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::InvalidDeclaration { path, .. }
            | SchemaError::PathCollision { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from SchemaError to the main Error type
impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err)
    }
}
