//! Error types for the session layer.

use std::path::PathBuf;

/// Errors from the durable key-value storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but isn't a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during session management.
///
/// Reading a session never fails; only persisting a change can.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session change could not be persisted.
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}
