//! Per-model attribute schemas.
//!
//! A [`Schema`] declares which dotted attribute paths a model admits
//! and which semantic [`Kind`] each holds. Schemas are built once via
//! [`SchemaBuilder`] and immutable afterwards; documents of one model
//! share the compiled schema behind an `Arc`.
//!
//! Building compiles the declarations into an **attribute tree**
//! ([`SchemaNode`]): one branch node per intermediate path segment,
//! one leaf per declared kind. The tree is the dispatch table the
//! document layer consults: leaves answer [`Schema::kind_of`], and
//! branch nodes (or [`Kind::Map`] leaves) admit nested proxies.
//!
//! # Usage
//!
//! ```
//! use veneer::schema::{Kind, Schema};
//!
//! let schema = Schema::builder("person")
//!     .attribute("name", Kind::Text)
//!     .attribute("address", Kind::Map)
//!     .build()?;
//!
//! assert!(schema.is_known("name"));
//! assert!(schema.permits("address.city.zip"));
//! assert!(!schema.permits("unknown_field"));
//! # Ok::<(), veneer::Error>(())
//! ```

use std::{
    collections::{BTreeMap, HashMap, btree_map, hash_map},
    fmt,
};

use tracing::debug;

pub mod errors;
pub mod sanitize;

pub use errors::SchemaError;
pub use sanitize::sanitize;

use crate::{
    document::Document,
    map::{Path, PathBuf, Value},
};

/// Semantic type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// UTF-8 text
    Text,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// Nested map; sub-paths beneath it need no declaration of their own
    Map,
    /// Ordered list
    List,
}

impl Kind {
    /// Parses a kind name, accepting both the Rust-native spellings and
    /// the classic document-store ones (`string`, `integer`, `hash`,
    /// `array`).
    pub fn parse(name: &str) -> Option<Kind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Some(Kind::Text),
            "int" | "integer" => Some(Kind::Int),
            "float" | "double" => Some(Kind::Float),
            "bool" | "boolean" => Some(Kind::Bool),
            "map" | "hash" | "object" => Some(Kind::Map),
            "list" | "array" => Some(Kind::List),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Text => "string",
            Kind::Int => "integer",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Map => "hash",
            Kind::List => "array",
        };
        write!(f, "{name}")
    }
}

/// A single attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    kind: Kind,
}

impl Declaration {
    /// Creates a declaration of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Parses a declaration from an untyped definition map, e.g. one
    /// loaded from a stored schema document: `{"type": "string"}`.
    ///
    /// Fails with [`SchemaError::InvalidDeclaration`] when the `type`
    /// entry is missing, not text, or names no known kind.
    pub fn from_value(path: &str, definition: &Value) -> Result<Self, SchemaError> {
        let map = definition
            .as_map()
            .ok_or_else(|| SchemaError::InvalidDeclaration {
                path: path.to_string(),
                reason: format!("declaration must be a map, found {}", definition.type_name()),
            })?;

        let type_name = match map.get("type") {
            Some(Value::Text(name)) => name,
            Some(other) => {
                return Err(SchemaError::InvalidDeclaration {
                    path: path.to_string(),
                    reason: format!("'type' must be text, found {}", other.type_name()),
                });
            }
            None => {
                return Err(SchemaError::InvalidDeclaration {
                    path: path.to_string(),
                    reason: "missing 'type'".to_string(),
                });
            }
        };

        let kind = Kind::parse(type_name).ok_or_else(|| SchemaError::InvalidDeclaration {
            path: path.to_string(),
            reason: format!("unknown type '{type_name}'"),
        })?;
        Ok(Declaration::new(kind))
    }
}

impl From<Kind> for Declaration {
    fn from(kind: Kind) -> Self {
        Declaration::new(kind)
    }
}

/// A node of the compiled attribute tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Intermediate segment introduced by nested declarations
    Branch(HashMap<String, SchemaNode>),
    /// Declared attribute of the given kind
    Leaf(Kind),
}

impl SchemaNode {
    /// Returns true if this node branches into further segments.
    pub fn is_branch(&self) -> bool {
        matches!(self, SchemaNode::Branch(_))
    }

    /// Returns the declared kind for leaf nodes.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            SchemaNode::Leaf(kind) => Some(*kind),
            SchemaNode::Branch(_) => None,
        }
    }

    /// Returns true if nested sub-paths may continue below this node:
    /// either a branch, or a declared map container.
    pub fn is_nested(&self) -> bool {
        matches!(self, SchemaNode::Branch(_) | SchemaNode::Leaf(Kind::Map))
    }

    fn child(&self, segment: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Branch(children) => children.get(segment),
            SchemaNode::Leaf(_) => None,
        }
    }
}

/// A computed setter invoked by [`Document::set`] for a name with no
/// declaration of its own.
pub type VirtualSetter = Box<dyn Fn(&mut Document, Value) -> crate::Result<()> + Send + Sync>;

/// Builder for a [`Schema`].
///
/// Registration is last-write-wins: re-declaring a path overwrites the
/// earlier declaration.
pub struct SchemaBuilder {
    model: String,
    verify_attributes: bool,
    declarations: BTreeMap<String, Declaration>,
    virtuals: HashMap<String, VirtualSetter>,
}

impl SchemaBuilder {
    fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            verify_attributes: true,
            declarations: BTreeMap::new(),
            virtuals: HashMap::new(),
        }
    }

    /// Declares an attribute path with the given kind.
    pub fn attribute(self, path: impl AsRef<Path>, kind: Kind) -> Self {
        self.declare(path, Declaration::new(kind))
    }

    /// Declares an attribute path with an explicit declaration.
    pub fn declare(mut self, path: impl AsRef<Path>, declaration: Declaration) -> Self {
        let normalized = PathBuf::normalize(path.as_ref().as_str());
        self.declarations
            .insert(normalized.as_str().to_string(), declaration);
        self
    }

    /// Sets whether documents verify their shape against this schema
    /// at construction time. Defaults to `true`.
    pub fn verify_attributes(mut self, verify: bool) -> Self {
        self.verify_attributes = verify;
        self
    }

    /// Registers a computed setter for an otherwise-unknown name.
    ///
    /// [`Document::set`] routes writes to `name` through `setter`
    /// instead of raising an unknown-attribute error, supporting
    /// attributes layered above raw storage.
    pub fn virtual_attribute<F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut Document, Value) -> crate::Result<()> + Send + Sync + 'static,
    {
        self.virtuals.insert(name.into(), Box::new(setter));
        self
    }

    /// Compiles the declarations into an immutable [`Schema`].
    ///
    /// Fails fast with [`SchemaError::PathCollision`] when a declared
    /// path extends through another declared leaf; that shape is a
    /// schema-author error, never resolved silently.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut root: HashMap<String, SchemaNode> = HashMap::new();

        for (path, declaration) in &self.declarations {
            if path.is_empty() {
                return Err(SchemaError::InvalidDeclaration {
                    path: path.clone(),
                    reason: "empty attribute path".to_string(),
                });
            }
            insert_node(&mut root, path, declaration.kind())?;
        }

        debug!(
            model = %self.model,
            attributes = self.declarations.len(),
            virtuals = self.virtuals.len(),
            "compiled schema"
        );

        Ok(Schema {
            model: self.model,
            verify_attributes: self.verify_attributes,
            declarations: self.declarations,
            tree: SchemaNode::Branch(root),
            virtuals: self.virtuals,
        })
    }
}

fn insert_node(
    root: &mut HashMap<String, SchemaNode>,
    path: &str,
    kind: Kind,
) -> Result<(), SchemaError> {
    let owned = PathBuf::normalize(path);
    let segments: Vec<&str> = owned.segments().collect();
    let (leaf, parents) = segments.split_last().expect("declared paths are non-empty");

    let mut current = root;
    let mut walked = PathBuf::new();
    for segment in parents {
        walked = walked.push(segment);
        let node = current
            .entry(segment.to_string())
            .or_insert_with(|| SchemaNode::Branch(HashMap::new()));
        match node {
            SchemaNode::Branch(children) => current = children,
            SchemaNode::Leaf(_) => {
                return Err(SchemaError::PathCollision {
                    path: path.to_string(),
                    leaf: walked.as_str().to_string(),
                });
            }
        }
    }

    match current.entry(leaf.to_string()) {
        hash_map::Entry::Occupied(_) => Err(SchemaError::PathCollision {
            path: path.to_string(),
            leaf: path.to_string(),
        }),
        hash_map::Entry::Vacant(slot) => {
            slot.insert(SchemaNode::Leaf(kind));
            Ok(())
        }
    }
}

/// An immutable per-model attribute registry.
///
/// Distinct model types never share a `Schema`; a model "inherits"
/// another's attributes only by declaring them again on its own
/// builder.
pub struct Schema {
    model: String,
    verify_attributes: bool,
    declarations: BTreeMap<String, Declaration>,
    tree: SchemaNode,
    virtuals: HashMap<String, VirtualSetter>,
}

impl Schema {
    /// Starts building a schema for the named model type.
    pub fn builder(model: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(model)
    }

    /// Returns the model type name this schema belongs to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns whether documents verify their shape at construction.
    pub fn verify_attributes(&self) -> bool {
        self.verify_attributes
    }

    /// Returns an iterator over the declared paths and declarations.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the declaration registered at exactly `path`.
    pub fn declaration(&self, path: impl AsRef<Path>) -> Option<&Declaration> {
        self.declarations.get(path.as_ref().as_str())
    }

    /// Returns the declared kind at exactly `path`.
    pub fn kind_of(&self, path: impl AsRef<Path>) -> Option<Kind> {
        self.declaration(path).map(Declaration::kind)
    }

    /// Returns true for `_id` and for exactly-declared paths.
    ///
    /// This deliberately does not accept sub-paths of declared map
    /// attributes; that wider rule is [`Schema::permits`].
    pub fn is_known(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        path.as_str() == "_id" || self.declarations.contains_key(path.as_str())
    }

    /// Returns true if a document of this model may hold `path`:
    /// known, or an extension of a declared [`Kind::Map`] attribute.
    pub fn permits(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if self.is_known(path) {
            return true;
        }

        let mut prefix = PathBuf::new();
        let mut segments = path.segments().peekable();
        while let Some(segment) = segments.next() {
            prefix = prefix.push(segment);
            // Only proper prefixes; the full path was handled above
            if segments.peek().is_none() {
                break;
            }
            if self.kind_of(&prefix) == Some(Kind::Map) {
                return true;
            }
        }
        false
    }

    /// Returns the attribute-tree node at `path`, if any.
    pub fn node_at(&self, path: impl AsRef<Path>) -> Option<&SchemaNode> {
        let mut current = &self.tree;
        for segment in path.as_ref().segments() {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Returns the registered virtual setter for `name`, if any.
    pub fn virtual_setter(&self, name: impl AsRef<Path>) -> Option<&VirtualSetter> {
        self.virtuals.get(name.as_ref().as_str())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("model", &self.model)
            .field("verify_attributes", &self.verify_attributes)
            .field("declarations", &self.declarations)
            .field("virtuals", &self.virtuals.len())
            .finish()
    }
}

/// Iterator support for consuming declaration listings.
impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a Declaration);
    type IntoIter = btree_map::Iter<'a, String, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
