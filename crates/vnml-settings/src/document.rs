//! The generic attribute-document the mapper reads and writes.
//!
//! One container holds a flat list of `(name, value, secure)` entries.
//! The mapper never cares how the container is carried; on disk it is
//! stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single persisted setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// The field name the entry maps back to.
    pub name: String,
    /// The string form of the value, possibly encrypted.
    pub value: String,
    /// Whether the value went through the encryption hook.
    #[serde(default)]
    pub secure: bool,
}

/// The container element holding every persisted setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Setting entries in registration order.
    pub settings: Vec<SettingEntry>,
}

impl SettingsDocument {
    /// Returns the first entry carrying `name`.
    pub fn find(&self, name: &str) -> Option<&SettingEntry> {
        self.settings.iter().find(|e| e.name == name)
    }

    /// Appends an entry.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>, secure: bool) {
        self.settings.push(SettingEntry {
            name: name.into(),
            value: value.into(),
            secure,
        });
    }

    /// Reads a document from a JSON file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes the document to `path` as pretty-printed JSON.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Returns the conventional location of an application's settings
/// document: `<config dir>/<app>/settings.json`.
pub fn default_settings_path(app: &str) -> Option<PathBuf> {
    vnml_core::paths::settings_file_path(app, "settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_the_first_match() {
        // Arrange
        let mut document = SettingsDocument::default();
        document.push("theme", "dark", false);
        document.push("theme", "light", false);

        // Act / Assert
        assert_eq!(document.find("theme").map(|e| e.value.as_str()), Some("dark"));
        assert_eq!(document.find("missing"), None);
    }

    #[test]
    fn document_round_trips_through_json() {
        // Arrange
        let mut document = SettingsDocument::default();
        document.push("theme", "dark", false);
        document.push("token", "3q2+7w==", true);

        // Act
        let json = serde_json::to_string(&document).unwrap();
        let parsed: SettingsDocument = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(parsed, document);
    }

    #[test]
    fn secure_flag_defaults_to_false_when_absent() {
        // Arrange
        let json = r#"{"settings":[{"name":"theme","value":"dark"}]}"#;

        // Act
        let parsed: SettingsDocument = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!parsed.settings[0].secure);
    }
}
