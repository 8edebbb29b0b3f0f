//! Error types for the driver

use sc_syntax::FileId;
use std::path::PathBuf;

/// Errors raised while managing source files
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The file id was never registered
    #[error("file not found: {0}")]
    FileNotFound(FileId),

    /// Reading a file from disk failed
    #[error("failed to read {}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
