//! Error types for swbs-util.

use std::path::PathBuf;

/// Error type for all fallible operations in the swbs-util crate.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// Returned when a file cannot be read.
    #[error("cannot read {}: {reason}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a file is not valid TOML.
    #[error("invalid TOML in {}: {reason}", path.display())]
    Toml {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message, including the offending location.
        reason: String,
    },
}
