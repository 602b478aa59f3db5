//! Error types for the export side of the codec

use std::path::PathBuf;

use thiserror::Error;

/// Failure writing to the system clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available: {0}")]
    Unavailable(String),

    #[error("clipboard write was rejected: {0}")]
    WriteFailed(String),

    #[error("could not keep the clipboard contents after exit: {0}")]
    HolderFailed(String),
}

/// Failure saving the raw text download
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
