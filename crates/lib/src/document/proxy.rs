//! AttributeProxy for nested attribute access.

use crate::map::{Path, PathBuf, Value};

use super::Document;

/// A view into one nested branch of a [`Document`].
///
/// A proxy binds a path prefix to its owning document so callers can
/// address sub-paths of a nested attribute without re-spelling the
/// prefix each time. It has no storage of its own: every read and
/// write reconstructs the full path and delegates to the document,
/// so schema checks and sanitization apply exactly as they would for
/// a direct access.
///
/// Obtained from [`Document::proxy`], which only issues proxies for
/// nested attributes (branch nodes of the attribute tree, or declared
/// map containers).
#[derive(Debug)]
pub struct AttributeProxy<'a> {
    doc: &'a mut Document,
    prefix: PathBuf,
}

impl<'a> AttributeProxy<'a> {
    pub(super) fn new(doc: &'a mut Document, prefix: PathBuf) -> Self {
        Self { doc, prefix }
    }

    /// Returns the path prefix this proxy is bound to.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Reads `prefix.sub_path` from the owning document.
    pub fn get(&self, sub_path: impl AsRef<Path>) -> crate::Result<Option<&Value>> {
        self.doc.get(self.full(sub_path))
    }

    /// Writes `prefix.sub_path` on the owning document.
    pub fn set(
        &mut self,
        sub_path: impl AsRef<Path>,
        value: impl Into<Value>,
    ) -> crate::Result<Option<Value>> {
        let full = self.full(sub_path);
        self.doc.set(full, value)
    }

    /// Removes `prefix.sub_path` from the owning document.
    pub fn unset(&mut self, sub_path: impl AsRef<Path>) -> Option<Value> {
        let full = self.full(sub_path);
        self.doc.unset(full)
    }

    /// Narrows to a proxy one or more segments deeper.
    pub fn at(self, sub_path: impl AsRef<Path>) -> AttributeProxy<'a> {
        let prefix = self.prefix.join(sub_path);
        AttributeProxy {
            doc: self.doc,
            prefix,
        }
    }

    fn full(&self, sub_path: impl AsRef<Path>) -> PathBuf {
        self.prefix.clone().join(sub_path)
    }
}
