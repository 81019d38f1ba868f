//! Error types for hola-core

use thiserror::Error;

/// Result type alias for hola operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the greeting service
///
/// Build-time variants (`SourceUnreadable`, `TableFull`, `UnknownLanguage`)
/// are fatal to configuration loading; `ResourceExhausted` is the only
/// request-time failure and maps to a 500 response.
#[derive(Debug, Error)]
pub enum Error {
    /// Translation definitions source could not be opened or read
    #[error("cannot read translation source {path}: {source}")]
    SourceUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// Translation table capacity exceeded during build
    #[error("translation table full: limit of {limit} entries exceeded")]
    TableFull { limit: usize },

    /// Configured default language has no translation
    #[error("unknown default language: {0}")]
    UnknownLanguage(String),

    /// Output buffer allocation failed while assembling a response
    #[error("resource exhausted while assembling response")]
    ResourceExhausted,

    /// IO error (native only)
    #[cfg(feature = "native")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hyper error (native only)
    #[cfg(feature = "native")]
    #[error("HTTP error: {0}")]
    Hyper(String),
}
