//! Nested path-addressed document container.
//!
//! [`DocMap`] is the in-memory representation of one document: a map
//! from string keys to [`Value`]s, where a value may itself be a nested
//! map to arbitrary depth. Every operation addresses a location by a
//! dotted [`Path`], so `map.get("address.city")` walks into the
//! `address` branch and reads `city`.
//!
//! `DocMap` knows nothing about schemas. Attribute declarations and
//! shape enforcement live in [`crate::schema`] and [`crate::document`];
//! this layer only materializes, reads, and merges structure.
//!
//! # Usage
//!
//! ```
//! use veneer::map::DocMap;
//!
//! let mut map = DocMap::new();
//! map.set("name", "Ann")?;
//! map.set("address.city", "X")?;
//!
//! assert_eq!(map.get("address.city").unwrap(), "X");
//! # Ok::<(), veneer::Error>(())
//! ```

use std::{collections::HashMap, fmt};

pub mod errors;
pub mod path;
pub mod value;

pub use errors::MapError;
pub use path::{Path, PathBuf};
pub use value::Value;

/// A nested string-keyed document map addressed by dotted paths.
///
/// Cloning a `DocMap` is a deep copy: the value variant owns its whole
/// tree, so a clone never shares nested structure with the original.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocMap {
    entries: HashMap<String, Value>,
}

impl DocMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no top-level keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a value exists at the given path.
    pub fn contains_path(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Gets a value by dotted path.
    ///
    /// Returns `None` when any intermediate segment is missing or is
    /// not itself a map.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Value> {
        let mut segments = path.as_ref().segments();
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            current = current.as_map()?.entries.get(segment)?;
        }
        Some(current)
    }

    /// Gets a mutable reference to a value by dotted path.
    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut Value> {
        let segments: Vec<&str> = path.as_ref().segments().collect();
        let (leaf, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = match current.entries.get_mut(*segment)? {
                Value::Map(map) => map,
                _ => return None,
            };
        }
        current.entries.get_mut(*leaf)
    }

    /// Sets a value at a dotted path, returning the previous value at
    /// that leaf if any.
    ///
    /// Missing intermediate segments are materialized as empty maps,
    /// and an intermediate non-map value is replaced by a map so the
    /// assignment always lands.
    pub fn set(
        &mut self,
        path: impl AsRef<Path>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, MapError> {
        let segments: Vec<&str> = path.as_ref().segments().collect();
        let (leaf, parents) = segments.split_last().ok_or(MapError::EmptyPath)?;

        let mut current = self;
        for segment in parents {
            let slot = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Value::Map(DocMap::new()));
            if !slot.is_map() {
                *slot = Value::Map(DocMap::new());
            }
            current = match slot {
                Value::Map(map) => map,
                _ => unreachable!(),
            };
        }
        Ok(current.entries.insert(leaf.to_string(), value.into()))
    }

    /// Removes the value at a dotted path, returning it if present.
    ///
    /// Removal is local to the leaf: ancestor maps left empty by the
    /// removal stay in place.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<Value> {
        let segments: Vec<&str> = path.as_ref().segments().collect();
        let (leaf, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = match current.entries.get_mut(*segment)? {
                Value::Map(map) => map,
                _ => return None,
            };
        }
        current.entries.remove(*leaf)
    }

    /// Returns a lazy iterator over every leaf path in the map.
    ///
    /// A leaf is any non-map value, or an empty nested map. The
    /// iterator borrows the map; call again for a fresh walk.
    pub fn leaf_paths(&self) -> LeafPaths<'_> {
        LeafPaths {
            stack: vec![(PathBuf::new(), self.entries.iter())],
        }
    }

    /// Returns a new map combining this one with `other`.
    ///
    /// `other` wins at every conflicting leaf; nested maps present on
    /// both sides are merged recursively rather than replaced.
    pub fn merged(&self, other: &DocMap) -> DocMap {
        let mut result = self.clone();
        result.merge_from(other);
        result
    }

    fn merge_from(&mut self, other: &DocMap) {
        for (key, theirs) in &other.entries {
            match (self.entries.get_mut(key), theirs) {
                (Some(Value::Map(ours)), Value::Map(branch)) => ours.merge_from(branch),
                (Some(slot), _) => *slot = theirs.clone(),
                (None, _) => {
                    self.entries.insert(key.clone(), theirs.clone());
                }
            }
        }
    }

    /// Flattens to the plain nested-object view handed to the
    /// persistence collaborator.
    pub fn to_key_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }

    /// Builds a map from a raw nested-object value.
    ///
    /// Fails unless the top level is an object; nested keys are
    /// strings by construction of the interchange type.
    pub fn from_key_value(value: serde_json::Value) -> Result<DocMap, MapError> {
        match Value::from(value) {
            Value::Map(map) => Ok(map),
            other => Err(MapError::NotAnObject {
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Parses a map from JSON text, as stored by the backing store.
    pub fn from_json_str(s: &str) -> crate::Result<DocMap> {
        let raw: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::from_key_value(raw)?)
    }

    /// Renders the key-value view as JSON text.
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.to_key_value())?)
    }

    /// Returns an iterator over the top-level key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns an iterator over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns an iterator over the top-level values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Builder method to set a value and return self.
    ///
    /// An empty path is ignored, matching [`DocMap::set`] addressing.
    pub fn with(mut self, path: impl AsRef<Path>, value: impl Into<Value>) -> Self {
        let _ = self.set(path, value);
        self
    }
}

/// Lazy depth-first walk over the leaf paths of a [`DocMap`].
///
/// Produced by [`DocMap::leaf_paths`].
pub struct LeafPaths<'a> {
    stack: Vec<(PathBuf, std::collections::hash_map::Iter<'a, String, Value>)>,
}

impl Iterator for LeafPaths<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((prefix, mut iter)) = self.stack.pop() {
            if let Some((key, value)) = iter.next() {
                let path = prefix.clone().push(key);
                self.stack.push((prefix, iter));
                match value {
                    Value::Map(map) if !map.is_empty() => {
                        self.stack.push((path, map.entries.iter()));
                    }
                    _ => return Some(path),
                }
            }
        }
        None
    }
}

impl FromIterator<(String, Value)> for DocMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for DocMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}
