//! Error types for map operations.

use thiserror::Error;

/// Structured error types for [`DocMap`](super::DocMap) operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MapError {
    /// The empty path cannot address a value
    #[error("empty path is not addressable")]
    EmptyPath,

    /// Key-value input was not a JSON object
    #[error("expected a JSON object at the document root, found {actual}")]
    NotAnObject { actual: String },

    /// Typed extraction found a different value shape
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl MapError {
    /// Check if this error is related to path addressing
    pub fn is_path_error(&self) -> bool {
        matches!(self, MapError::EmptyPath)
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            MapError::TypeMismatch { .. } | MapError::NotAnObject { .. }
        )
    }
}

// Conversion from MapError to the main Error type
impl From<MapError> for crate::Error {
    fn from(err: MapError) -> Self {
        crate::Error::Map(err)
    }
}
