//! Error types for document operations.

use thiserror::Error;

/// Structured error types for [`Document`](super::Document) operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A path is neither declared, `_id`, nor an extension of a
    /// declared map attribute (and, for writes, has no virtual setter)
    #[error("unknown attribute '{path}' for model '{model}'")]
    UnknownAttribute { model: String, path: String },

    /// A proxy was requested at a path that does not nest
    #[error("attribute '{path}' of model '{model}' is not a nested attribute")]
    NotNested { model: String, path: String },
}

impl DocumentError {
    /// Check if this error names an unknown attribute
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, DocumentError::UnknownAttribute { .. })
    }

    /// Get the attribute path associated with this error
    pub fn path(&self) -> &str {
        match self {
            DocumentError::UnknownAttribute { path, .. }
            | DocumentError::NotNested { path, .. } => path,
        }
    }

    /// Get the model name associated with this error
    pub fn model(&self) -> &str {
        match self {
            DocumentError::UnknownAttribute { model, .. }
            | DocumentError::NotNested { model, .. } => model,
        }
    }
}

// Conversion from DocumentError to the main Error type
impl From<DocumentError> for crate::Error {
    fn from(err: DocumentError) -> Self {
        crate::Error::Document(err)
    }
}
