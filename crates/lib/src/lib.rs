//!
//! Veneer: a thin schema-like attribute layer over schemaless documents.
//! This library provides the attribute-definition and dotted-path access
//! core an object-document mapper is built around.
//!
//! ## Core Concepts
//!
//! * **Maps (`map::DocMap`)**: the nested string-keyed container holding one
//!   document's data, addressed by dotted paths (`"address.city"`).
//! * **Values (`map::Value`)**: the closed variant a document position holds:
//!   scalar leaves, lists, or nested maps.
//! * **Schemas (`schema::Schema`)**: per-model registries declaring which
//!   attribute paths exist and which semantic kind each holds, compiled once
//!   into an attribute tree.
//! * **Sanitization (`schema::sanitize`)**: kind-directed coercion of raw
//!   values into their declared shape.
//! * **Documents (`document::Document`)**: model instances enforcing a schema
//!   over one map: verified construction, checked reads and writes, change
//!   snapshots for persistence collaborators.
//! * **Proxies (`document::AttributeProxy`)**: prefix-bound views for working
//!   under a nested attribute without re-spelling its path.
//!
//! Persistence transport, query building, and validation rule engines are
//! external collaborators; this crate only exposes the surfaces they consume.

pub mod document;
pub mod map;
pub mod schema;

/// Re-export the `Document` struct for easier access.
pub use document::Document;

/// Result type used throughout the Veneer library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Veneer library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured map errors from the map module
    #[error(transparent)]
    Map(map::MapError),

    /// Structured schema errors from the schema module
    #[error(transparent)]
    Schema(schema::SchemaError),

    /// Structured document errors from the document module
    #[error(transparent)]
    Document(document::DocumentError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Map(_) => "map",
            Error::Schema(_) => "schema",
            Error::Document(_) => "document",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error names an unknown attribute.
    pub fn is_unknown_attribute(&self) -> bool {
        match self {
            Error::Document(doc_err) => doc_err.is_unknown_attribute(),
            _ => false,
        }
    }

    /// Check if this error is a sanitization failure.
    pub fn is_sanitize_error(&self) -> bool {
        match self {
            Error::Schema(schema_err) => schema_err.is_sanitize_error(),
            _ => false,
        }
    }

    /// Check if this error arose at schema declaration time.
    pub fn is_declaration_error(&self) -> bool {
        match self {
            Error::Schema(schema_err) => schema_err.is_declaration_error(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is path-addressing related.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_path_error(),
            _ => false,
        }
    }
}
