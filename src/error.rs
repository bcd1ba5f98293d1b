//! Session error taxonomy

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Stable reason code for a failed session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIndex,
    NotFound,
    AlreadyExists,
    AlreadyOpen,
    UnsavedChanges,
    ReadError,
    WriteError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidIndex => "invalid index",
            Self::NotFound => "not found",
            Self::AlreadyExists => "already exists",
            Self::AlreadyOpen => "already open",
            Self::UnsavedChanges => "unsaved changes",
            Self::ReadError => "read error",
            Self::WriteError => "write error",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`DocumentSession`](crate::model::DocumentSession) operations.
///
/// A failed operation never leaves partial state behind.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid document index {index} ({count} open)")]
    InvalidIndex { index: usize, count: usize },

    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("file is already open in another tab: {}", .0.display())]
    AlreadyOpen(PathBuf),

    #[error("file has unsaved changes: {name}")]
    UnsavedChanges { index: usize, name: String },

    #[error("failed to load file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to save file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::AlreadyOpen(_) => ErrorKind::AlreadyOpen,
            Self::UnsavedChanges { .. } => ErrorKind::UnsavedChanges,
            Self::Read { .. } => ErrorKind::ReadError,
            Self::Write { .. } => ErrorKind::WriteError,
        }
    }

    /// Short human-readable context: the offending path, name or index
    pub fn context(&self) -> String {
        match self {
            Self::InvalidIndex { index, .. } => index.to_string(),
            Self::NotFound(path)
            | Self::AlreadyExists(path)
            | Self::AlreadyOpen(path)
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path.display().to_string(),
            Self::UnsavedChanges { name, .. } => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_context() {
        let err = SessionError::NotFound(PathBuf::from("/tmp/missing.txt"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.context(), "/tmp/missing.txt");

        let err = SessionError::InvalidIndex { index: 4, count: 2 };
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
        assert_eq!(err.context(), "4");
    }

    #[test]
    fn test_error_messages() {
        let err = SessionError::UnsavedChanges {
            index: 0,
            name: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "file has unsaved changes: notes.txt");

        let err = SessionError::Write {
            path: PathBuf::from("out.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::WriteError);
        assert_eq!(err.to_string(), "failed to save file out.txt: denied");
    }
}
