//! The VNml document model.
//!
//! A document is an ordered list of named sections, each holding an
//! ordered list of `key=[value]` entries. Sections and values carry
//! `;`-prefixed comment lines that survive a load/save round trip.
//! Section addressing goes through an optional namespace prefix, so
//! several components can share one file without clashing:
//!
//! ```text
//! -- VNml v.1.0. --
//! ;window placement, saved on exit
//! editor:MainWindow
//!     ;last known size
//!     width=[1280]
//!     height=[720]
//! ```
//!
//! (The value lines above are tab-indented in the real format.)

mod parser;
mod writer;

use std::fs;
use std::path::Path;

use crate::bytes;
use crate::error::Result;

/// Version banners accepted on the first line of a document.
///
/// New format revisions append here; documents are always saved with
/// the newest banner.
pub const VERSION_BANNERS: &[&str] = &["-- VNml v.1.0. --"];

/// A single `key=[value]` entry with its attached comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueEntry {
    key: String,
    value: String,
    comments: Vec<String>,
}

impl ValueEntry {
    /// The entry's key, including any `BIN:` prefix.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw string payload.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Comment lines attached above the entry.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}

/// A named, ordered group of value entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    comments: Vec<String>,
    values: Vec<ValueEntry>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            values: Vec::new(),
        }
    }

    /// The section name as stored, namespace prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comment lines attached above the section header.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// The section's value entries in insertion order.
    pub fn values(&self) -> &[ValueEntry] {
        &self.values
    }
}

/// An in-memory VNml document.
///
/// Constructed empty or populated via [`load`](Document::load);
/// persisted as a whole with [`save`](Document::save). All section
/// addressing applies the document's namespace transparently.
#[derive(Debug, Clone, Default)]
pub struct Document {
    namespace: String,
    sections: Vec<Section>,
}

impl Document {
    /// Creates an empty document with no namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document using `namespace` for addressing.
    pub fn with_namespace(namespace: &str) -> Self {
        let mut document = Self::new();
        document.set_namespace(namespace);
        document
    }

    /// The current namespace, without the `:` separator.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Sets the namespace. Whitespace is stripped from the value.
    pub fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace.trim().replace(' ', "");
    }

    /// The sections currently in the document, in save order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}:{}", self.namespace, name)
        }
    }

    /// Loads a document from `path`, merging with the in-memory model.
    ///
    /// A missing file is a silent no-op. Sections already in memory are
    /// kept; a section name appearing both in memory and in the file is
    /// a [`DuplicateSection`](crate::Error::DuplicateSection) error.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }
        let text = fs::read_to_string(path)?;
        self.load_str(&text)
    }

    /// Parses `text`, merging its sections into the in-memory model.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        parser::parse_into(text, &mut self.sections)
    }

    /// Saves the whole document to `path`, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Renders the document into its on-disk text form.
    pub fn render(&self) -> String {
        writer::render(&self.sections)
    }

    /// Returns the most recently written value under `name`/`key`.
    pub fn get(&self, name: &str, key: &str) -> Option<&str> {
        let name = self.qualify(name);
        let section = self.sections.iter().find(|s| s.name == name)?;
        section
            .values
            .iter()
            .rev()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }

    /// Like [`get`](Document::get), substituting `default` on a miss.
    pub fn get_or<'a>(&'a self, name: &str, key: &str, default: &'a str) -> &'a str {
        self.get(name, key).unwrap_or(default)
    }

    /// Decodes the binary payload stored under `name`/`key`.
    ///
    /// Binary keys carry the `BIN:` prefix by convention. The `"0x"`
    /// sentinel (an empty payload), a malformed payload, and a lookup
    /// miss all read back as `None`.
    pub fn get_bytes(&self, name: &str, key: &str) -> Option<Vec<u8>> {
        let value = self.get(name, key)?;
        if value == "0x" {
            return None;
        }
        bytes::from_hex_string(value)
    }

    /// Writes, overwrites or deletes the value under `name`/`key`.
    ///
    /// Existing entries for the key are removed and their comments
    /// carry over to the replacement. `None` deletes without re-adding;
    /// the section is created on demand for a non-`None` value.
    pub fn set(&mut self, name: &str, key: &str, value: Option<&str>) {
        let name = self.qualify(name);
        let mut carried = Vec::new();
        if let Some(section) = self.sections.iter_mut().find(|s| s.name == name) {
            let mut kept = Vec::with_capacity(section.values.len());
            for entry in section.values.drain(..) {
                if entry.key == key {
                    carried.extend(entry.comments);
                } else {
                    kept.push(entry);
                }
            }
            section.values = kept;
        }

        let Some(value) = value else {
            return;
        };

        if self.sections.iter().all(|s| s.name != name) {
            self.sections.push(Section::new(name.as_str()));
        }
        if let Some(section) = self.sections.iter_mut().find(|s| s.name == name) {
            section.values.push(ValueEntry {
                key: key.to_string(),
                value: value.to_string(),
                comments: carried,
            });
        }
    }

    /// Stores a binary payload as hex text under `name`/`key`.
    ///
    /// An empty slice is stored as the `"0x"` sentinel; `None` deletes
    /// the entry like [`set`](Document::set).
    pub fn set_bytes(&mut self, name: &str, key: &str, value: Option<&[u8]>) {
        match value {
            Some(data) => {
                let hex = bytes::to_hex_string(data);
                self.set(name, key, Some(&hex));
            }
            None => self.set(name, key, None),
        }
    }

    /// Deletes sections matching `mask` in the current namespace.
    ///
    /// `"*"` clears the whole document. A mask ending in `*` deletes
    /// every section whose namespaced name starts with the rest of the
    /// mask; any other mask deletes the exact namespaced match. A mask
    /// that is empty after namespace prefixing is a no-op.
    pub fn delete_sections(&mut self, mask: &str) {
        if mask == "*" {
            self.sections.clear();
            return;
        }
        let wildcard = mask.ends_with('*');
        let mask = self.qualify(mask.strip_suffix('*').unwrap_or(mask));
        if mask.is_empty() {
            return;
        }
        if wildcard {
            self.sections.retain(|s| !s.name.starts_with(&mask));
        } else {
            self.sections.retain(|s| s.name != mask);
        }
    }

    /// Deletes values matching `mask` from the named section.
    ///
    /// Masking works as in [`delete_sections`](Document::delete_sections),
    /// applied to value keys; the mask itself is never namespaced. An
    /// empty mask (including a bare `"*"`) is a no-op. A section left
    /// without values is removed.
    pub fn delete_values(&mut self, section: &str, mask: &str) {
        let wildcard = mask.ends_with('*');
        let mask = mask.strip_suffix('*').unwrap_or(mask);
        if mask.is_empty() {
            return;
        }
        let section = self.qualify(section);
        if let Some(index) = self.sections.iter().position(|s| s.name == section) {
            let values = &mut self.sections[index].values;
            if wildcard {
                values.retain(|v| !v.key.starts_with(mask));
            } else {
                values.retain(|v| v.key != mask);
            }
            if values.is_empty() {
                self.sections.remove(index);
            }
        }
    }

    /// Replaces the comments of a section (`key == None`) or of the
    /// most recent entry under `key`.
    ///
    /// Returns `false` when the section or entry does not exist.
    pub fn set_comment(&mut self, name: &str, key: Option<&str>, comments: &[&str]) -> bool {
        let name = self.qualify(name);
        let Some(section) = self.sections.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        match key {
            None => {
                section.comments = comments.iter().map(|c| c.to_string()).collect();
                true
            }
            Some(key) => match section.values.iter_mut().rev().find(|v| v.key == key) {
                Some(entry) => {
                    entry.comments = comments.iter().map(|c| c.to_string()).collect();
                    true
                }
                None => false,
            },
        }
    }

    /// Returns the comments of a section (`key == None`) or of the
    /// most recent entry under `key`.
    ///
    /// Misses return `None`, as does a value entry whose comment list
    /// is empty.
    pub fn get_comment(&self, name: &str, key: Option<&str>) -> Option<&[String]> {
        let name = self.qualify(name);
        let section = self.sections.iter().find(|s| s.name == name)?;
        match key {
            None => Some(section.comments.as_slice()),
            Some(key) => {
                let entry = section.values.iter().rev().find(|v| v.key == key)?;
                if entry.comments.is_empty() {
                    None
                } else {
                    Some(entry.comments.as_slice())
                }
            }
        }
    }
}
