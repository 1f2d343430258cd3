//! Error types for the GridFloat crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading GridFloat data.
#[derive(Debug, Error)]
pub enum GridFloatError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One of the dataset files is absent or unreadable.
    #[error("Cannot read {path}: {source}")]
    MissingFile {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The header file is missing a line or has a non-numeric field.
    #[error("Malformed header {path} (line {line}, field `{field}`): {reason}")]
    MalformedHeader {
        /// Path of the header file.
        path: PathBuf,
        /// 1-based line number of the offending field.
        line: usize,
        /// Name of the field being parsed.
        field: &'static str,
        /// What went wrong with the token.
        reason: String,
    },

    /// The binary grid file holds fewer records than the header promises.
    #[error("Truncated grid data in {path}: expected {expected_bytes} bytes, found {actual_bytes}")]
    TruncatedData {
        /// Path of the binary grid file.
        path: PathBuf,
        /// `rows * columns * 4` per the header.
        expected_bytes: usize,
        /// Bytes actually available.
        actual_bytes: usize,
    },

    /// The grid cannot support the derived computations.
    #[error("Degenerate grid: {0}")]
    DegenerateGrid(String),
}
