//! Schema-enforced document instances.
//!
//! A [`Document`] wraps one [`DocMap`] and overlays the model's
//! [`Schema`] on it: reads and writes are checked against the declared
//! attribute paths, written values are sanitized into their declared
//! kinds, and the construction-time shape of raw input is verified
//! when the model opts in (the default).
//!
//! The document also carries the two hooks its collaborators need:
//! the persistence side reads [`Document::attributes`] /
//! [`Document::to_key_value`] and the persisted-state snapshot, and a
//! generic validation framework probes values through
//! [`Document::read_attribute_for_validation`], which never errors.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use veneer::{map::DocMap, schema::{Kind, Schema}, Document};
//!
//! let schema = Arc::new(
//!     Schema::builder("person")
//!         .attribute("name", Kind::Text)
//!         .attribute("address", Kind::Map)
//!         .build()?,
//! );
//!
//! let mut doc = Document::new(
//!     schema,
//!     DocMap::new().with("name", "Ann").with("address.city", "X"),
//! )?;
//!
//! assert_eq!(doc.get("address.city")?.unwrap(), "X");
//! assert!(doc.set("unknown_field", 1).is_err());
//! # Ok::<(), veneer::Error>(())
//! ```

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, trace};
use uuid::Uuid;

pub mod errors;
pub mod proxy;

pub use errors::DocumentError;
pub use proxy::AttributeProxy;

use crate::{
    map::{DocMap, Path, PathBuf, Value},
    schema::{Schema, sanitize},
};

/// A model instance: one owned document map plus the model's schema.
///
/// A document is **unsaved** until its write to the backing store
/// succeeds, at which point the persistence collaborator calls
/// [`Document::mark_persisted`]; persisted documents carry a deep-clone
/// snapshot of their map from that moment for later change diffing.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    map: DocMap,
    persisted: bool,
    snapshot: Option<DocMap>,
}

impl Document {
    /// Constructs an unsaved document from a raw map.
    ///
    /// When the schema has `verify_attributes` enabled, every leaf
    /// path of the input must be `_id`, a declared path, or an
    /// extension of a declared map attribute; the first offending path
    /// fails construction with [`DocumentError::UnknownAttribute`].
    pub fn new(schema: Arc<Schema>, map: DocMap) -> crate::Result<Self> {
        Self::construct(schema, map, false)
    }

    /// Constructs a document representing an already-persisted record.
    ///
    /// Shape verification applies as in [`Document::new`]; on success
    /// the map is deep-cloned as the persisted snapshot.
    pub fn persisted(schema: Arc<Schema>, map: DocMap) -> crate::Result<Self> {
        Self::construct(schema, map, true)
    }

    /// Constructs an unsaved document from a raw key-value object, as
    /// handed over by the backing store's decoder.
    pub fn from_key_value(schema: Arc<Schema>, raw: serde_json::Value) -> crate::Result<Self> {
        let map = DocMap::from_key_value(raw)?;
        Self::construct(schema, map, false)
    }

    fn construct(schema: Arc<Schema>, map: DocMap, persisted: bool) -> crate::Result<Self> {
        if schema.verify_attributes() {
            verify_shape(&schema, &map)?;
        }
        let snapshot = persisted.then(|| map.clone());
        trace!(model = %schema.model(), persisted, "constructed document");
        Ok(Self {
            schema,
            map,
            persisted,
            snapshot,
        })
    }

    /// Returns the schema this document is checked against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns true for exactly `_id` and declared attribute paths.
    pub fn known_attribute(&self, path: impl AsRef<Path>) -> bool {
        self.schema.is_known(normalized(path))
    }

    /// Gets the value at a declared (or map-extension) path.
    ///
    /// Absent values read as `Ok(None)`; paths outside the schema fail
    /// with [`DocumentError::UnknownAttribute`].
    pub fn get(&self, path: impl AsRef<Path>) -> crate::Result<Option<&Value>> {
        let path = normalized(path);
        if !self.schema.permits(&path) {
            return Err(self.unknown_attribute(&path).into());
        }
        Ok(self.map.get(&path))
    }

    /// Sets the value at a declared (or map-extension) path.
    ///
    /// Unknown paths are first offered to the schema's virtual-setter
    /// table; otherwise they fail with
    /// [`DocumentError::UnknownAttribute`]. Known non-`_id`, non-null
    /// values are sanitized into their declared kind before storage;
    /// map-extension paths carry no declaration and store unsanitized.
    pub fn set(
        &mut self,
        path: impl AsRef<Path>,
        value: impl Into<Value>,
    ) -> crate::Result<Option<Value>> {
        let path = normalized(path);
        let value = value.into();

        if !self.schema.permits(&path) {
            let schema = self.schema.clone();
            if let Some(setter) = schema.virtual_setter(&path) {
                trace!(model = %schema.model(), path = %path, "dispatching virtual setter");
                setter(self, value)?;
                return Ok(None);
            }
            return Err(self.unknown_attribute(&path).into());
        }

        let value = if path.as_str() == "_id" || value.is_null() {
            value
        } else {
            match self.schema.kind_of(&path) {
                Some(kind) => sanitize(kind, value)?,
                None => value,
            }
        };
        Ok(self.map.set(&path, value)?)
    }

    /// Removes the value at a path unconditionally, with no schema check.
    pub fn unset(&mut self, path: impl AsRef<Path>) -> Option<Value> {
        self.map.remove(normalized(path))
    }

    /// Applies [`Document::set`] per pair, in order.
    ///
    /// Not atomic: a failure partway through leaves the earlier writes
    /// committed.
    pub fn set_many<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> crate::Result<()>
    where
        K: AsRef<Path>,
        V: Into<Value>,
    {
        for (path, value) in pairs {
            self.set(path, value)?;
        }
        Ok(())
    }

    /// Gets every requested path, keyed by its dotted string.
    pub fn get_many<K>(
        &self,
        paths: impl IntoIterator<Item = K>,
    ) -> crate::Result<HashMap<String, Option<Value>>>
    where
        K: AsRef<Path>,
    {
        let mut found = HashMap::new();
        for path in paths {
            let path = normalized(path);
            let value = self.get(&path)?.cloned();
            found.insert(path.as_str().to_string(), value);
        }
        Ok(found)
    }

    /// Applies [`Document::unset`] per path.
    pub fn unset_many<K>(&mut self, paths: impl IntoIterator<Item = K>)
    where
        K: AsRef<Path>,
    {
        for path in paths {
            self.unset(path);
        }
    }

    /// Deep-merges a raw map into this document, the input winning at
    /// every conflicting leaf.
    ///
    /// Merge skips shape verification: it is deliberately more
    /// permissive than construction and admits paths the schema would
    /// reject.
    pub fn merge(&mut self, raw: &DocMap) {
        self.map = self.map.merged(raw);
        debug!(model = %self.schema.model(), keys = raw.len(), "merged raw map into document");
    }

    /// [`Document::merge`] for a raw key-value object.
    pub fn merge_key_value(&mut self, raw: serde_json::Value) -> crate::Result<()> {
        let raw = DocMap::from_key_value(raw)?;
        self.merge(&raw);
        Ok(())
    }

    /// Returns the full current attribute map.
    pub fn attributes(&self) -> &DocMap {
        &self.map
    }

    /// Flattens the current map to the key-value view handed verbatim
    /// to the persistence collaborator.
    pub fn to_key_value(&self) -> serde_json::Value {
        self.map.to_key_value()
    }

    /// Returns true once this document represents a stored record.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Transitions to the persisted state, capturing the snapshot.
    ///
    /// Called by the persistence collaborator after a successful
    /// write.
    pub fn mark_persisted(&mut self) {
        self.persisted = true;
        self.snapshot = Some(self.map.clone());
    }

    /// Returns the deep-clone snapshot captured when this document was
    /// last marked persisted, for change-diffing collaborators.
    pub fn persisted_snapshot(&self) -> Option<&DocMap> {
        self.snapshot.as_ref()
    }

    /// Reads a value for a generic validation framework.
    ///
    /// Unlike [`Document::get`], this never errors: rules are free to
    /// probe paths outside the schema and observe them as absent.
    pub fn read_attribute_for_validation(&self, path: impl AsRef<Path>) -> Option<&Value> {
        self.map.get(normalized(path))
    }

    /// Returns the document id, the always-known `_id` attribute.
    pub fn id(&self) -> Option<&Value> {
        self.map.get("_id")
    }

    /// Sets the document id.
    pub fn set_id(&mut self, value: impl Into<Value>) -> crate::Result<Option<Value>> {
        self.set("_id", value)
    }

    /// Returns the document id, assigning a fresh uuid text id first
    /// if none is present.
    pub fn ensure_id(&mut self) -> crate::Result<Value> {
        if let Some(id) = self.id() {
            return Ok(id.clone());
        }
        let id = Value::Text(Uuid::new_v4().to_string());
        self.map.set("_id", id.clone())?;
        Ok(id)
    }

    /// Returns a proxy bound to a nested attribute.
    ///
    /// Issued only where the attribute tree nests: branch nodes
    /// introduced by dotted declarations, and declared map containers.
    /// Anything else fails with [`DocumentError::NotNested`].
    pub fn proxy(&mut self, path: impl AsRef<Path>) -> crate::Result<AttributeProxy<'_>> {
        let path = normalized(path);
        let nested = self
            .schema
            .node_at(&path)
            .is_some_and(|node| node.is_nested());
        if nested {
            Ok(AttributeProxy::new(self, path))
        } else {
            Err(DocumentError::NotNested {
                model: self.schema.model().to_string(),
                path: path.as_str().to_string(),
            }
            .into())
        }
    }

    fn unknown_attribute(&self, path: &Path) -> DocumentError {
        DocumentError::UnknownAttribute {
            model: self.schema.model().to_string(),
            path: path.as_str().to_string(),
        }
    }
}

/// Documents compare within one model type: persisted pairs by id,
/// anything else by full raw content.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if self.schema.model() != other.schema.model() {
            return false;
        }
        if self.persisted && other.persisted {
            self.id() == other.id()
        } else {
            self.map == other.map
        }
    }
}

fn normalized(path: impl AsRef<Path>) -> PathBuf {
    PathBuf::normalize(path.as_ref().as_str())
}

fn verify_shape(schema: &Schema, map: &DocMap) -> Result<(), DocumentError> {
    for path in map.leaf_paths() {
        if !schema.permits(&path) {
            debug!(model = %schema.model(), path = %path, "rejecting undeclared attribute");
            return Err(DocumentError::UnknownAttribute {
                model: schema.model().to_string(),
                path: path.as_str().to_string(),
            });
        }
    }
    Ok(())
}
