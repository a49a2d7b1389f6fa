//! Error types for structure and topology file I/O

use thiserror::Error;

/// Errors that can occur while reading structure or topology files
///
/// Malformed optional sections are not errors: they surface as `None` on
/// the parsed document. Only conditions that leave nothing usable end up
/// here.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (missing file, permission, truncated gzip stream)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension does not name a supported text format
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Document was read but its essential content could not be recovered
    #[error("Invalid {format} document: {reason}")]
    InvalidDocument {
        /// Format name, as reported by `FileFormat::name`
        format: &'static str,
        /// What made the document unusable
        reason: String,
    },

    /// File is empty or contains no records
    #[error("Empty file or no records found")]
    EmptyFile,
}

impl IoError {
    /// Create an invalid document error
    pub fn invalid_document(format: &'static str, reason: impl Into<String>) -> Self {
        IoError::InvalidDocument {
            format,
            reason: reason.into(),
        }
    }

    /// Create an unknown format error for the given path or extension
    pub fn unknown_format(what: impl Into<String>) -> Self {
        IoError::UnknownFormat(what.into())
    }
}

/// Result type for structure and topology I/O operations
pub type IoResult<T> = Result<T, IoError>;
