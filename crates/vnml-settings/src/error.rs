/// Errors funnelled through the mapper's report hook.
///
/// None of these abort a whole load or save — the mapper isolates
/// failures per field and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Underlying read or write failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document on disk could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value could not be coerced back into its field's type.
    #[error("setting {name}: cannot convert {value:?}")]
    Convert {
        /// The registered field name.
        name: String,
        /// The stored string that failed to parse.
        value: String,
    },

    /// A complex-typed field had no converter registered on save.
    #[error("setting {name}: no converter registered for {type_name}")]
    MissingConverter {
        /// The registered field name.
        name: String,
        /// The Rust type the converter was looked up for.
        type_name: &'static str,
    },
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
