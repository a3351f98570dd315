//! Editor error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by buffers and the command line
#[derive(Debug, Error)]
pub enum EditorError {
    /// File could not be read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Row index outside the buffer
    #[error("line {index} out of range (buffer has {len} lines)")]
    OutOfRange { index: usize, len: usize },

    /// Command line did not name a known command
    #[error("Not an editor command: {0}")]
    UnrecognizedCommand(String),

    /// Save requested for a buffer with no backing file
    #[error("No file name")]
    NoPath,
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;
