//! Error types for DCD access

use thiserror::Error;

/// Errors that can occur while reading or writing a DCD file
#[derive(Error, Debug)]
pub enum DcdError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File ended inside a header field or frame block
    #[error("Unexpected end of file reading {what} at byte {position}")]
    UnexpectedEof {
        /// Which block was being read
        what: &'static str,
        /// Byte offset the read started at
        position: u64,
    },

    /// Coordinate array handed to a write does not match the atom count
    #[error("{axis} array has {actual} values but the trajectory has {expected} atoms")]
    LengthMismatch {
        axis: char,
        expected: usize,
        actual: usize,
    },

    /// Cursor sits in the header, so it is not inside any frame
    #[error("Position {position} lies before the first frame at byte {offset}")]
    BeforeFirstFrame { position: u64, offset: u64 },
}

impl DcdError {
    /// Map an I/O error from a read of `what`, turning short reads into
    /// [`DcdError::UnexpectedEof`]
    pub(crate) fn from_read(err: std::io::Error, what: &'static str, position: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            DcdError::UnexpectedEof { what, position }
        } else {
            DcdError::Io(err)
        }
    }
}

/// Result type for DCD operations
pub type DcdResult<T> = Result<T, DcdError>;
