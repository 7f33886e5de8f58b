//! Error types for version resolution.

use std::path::PathBuf;

/// Version resolution error.
///
/// Every variant is terminal: resolution never substitutes defaults.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// Property file is missing or unreadable.
    #[error("{} doesn't exist", path.display())]
    FileNotFound { path: PathBuf },

    /// A required key is absent from the property file.
    #[error("missing required property `{key}`")]
    MissingField { key: String },

    /// A value could not be parsed as an integer.
    #[error("property `{key}` is not a valid integer: {value:?}")]
    InvalidFormat { key: String, value: String },

    /// The property file is not a valid properties document.
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Result type alias for version operations.
pub type Result<T> = std::result::Result<T, VersionError>;
