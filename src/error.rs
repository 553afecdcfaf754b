//! Error types for tablemark library.

use std::io;
use thiserror::Error;

/// Result type alias for tablemark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting content to Markdown.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Nothing left to render after processing.
    #[error("{0}")]
    EmptyInput(String),

    /// A requested worksheet does not exist.
    #[error("Sheet '{name}' not found. Available sheets: {}", .available.join(", "))]
    SheetNotFound {
        /// The requested sheet name
        name: String,
        /// Names of the sheets that do exist
        available: Vec<String>,
    },

    /// No adapter is registered for the input.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error raised by a source adapter while reading its input.
    #[error("Source error: {0}")]
    Source(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Short machine-readable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::EmptyInput(_) => "empty_input",
            Error::SheetNotFound { .. } => "sheet_not_found",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Source(_) => "source",
            Error::Render(_) => "render",
            Error::Other(_) => "other",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
