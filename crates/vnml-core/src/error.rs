/// Errors raised while loading or saving a VNml document.
///
/// Lookup misses are not errors — the accessors on
/// [`Document`](crate::Document) return `Option`/`bool` for those.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The first line of a non-empty document matched none of the
    /// recognized version banners.
    #[error("unrecognized version banner: {0}")]
    UnknownVersion(String),

    /// The same section name appeared twice while loading.
    #[error("duplicate section name: {0}")]
    DuplicateSection(String),

    /// A structurally malformed line.
    #[error("line {line}: {reason}")]
    Format {
        /// One-based line number within the loaded text.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Underlying read or write failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;
