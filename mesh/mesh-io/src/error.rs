//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// Soup position count is not a multiple of three.
    #[error("malformed triangle soup: {positions} positions is not a multiple of 3")]
    MalformedSoup {
        /// Number of positions in the soup.
        positions: usize,
    },

    /// Soup normal count does not match its normal mode.
    #[error("soup normal count mismatch: expected {expected}, got {got}")]
    NormalCountMismatch {
        /// Normals required by the mode.
        expected: usize,
        /// Normals present.
        got: usize,
    },

    /// Triangle count does not fit the 32-bit STL count field.
    #[error("{count} triangles exceed the binary STL limit of {}", u32::MAX)]
    TooManyTriangles {
        /// Number of triangles in the soup.
        count: usize,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid header in binary STL.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// Fewer triangle records than the header announces.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Number of faces announced by the header.
        expected: u32,
        /// Number of complete face records present.
        got: u32,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
