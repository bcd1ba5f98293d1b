//! File validation utilities for opening files
//!
//! Validates files before attempting to read them as text, checking for:
//! - File existence and permissions
//! - File size limits

use std::fs;
use std::io;
use std::path::Path;

/// Default maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Errors that can occur when validating a file for opening
#[derive(Debug, Clone)]
pub enum FileOpenError {
    /// File does not exist
    NotFound,
    /// Permission denied to read file
    PermissionDenied,
    /// Path is a directory, not a file
    IsDirectory,
    /// File exceeds size limit
    TooLarge { size_mb: f64, max_mb: u64 },
    /// Other I/O error
    IoError(String),
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::TooLarge { size_mb, max_mb } => {
                write!(f, "file too large ({:.1} MB, max {} MB)", size_mb, max_mb)
            }
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

impl From<FileOpenError> for io::Error {
    fn from(err: FileOpenError) -> Self {
        let kind = match err {
            FileOpenError::NotFound => io::ErrorKind::NotFound,
            FileOpenError::PermissionDenied => io::ErrorKind::PermissionDenied,
            FileOpenError::IsDirectory => io::ErrorKind::InvalidData,
            FileOpenError::TooLarge { .. } => io::ErrorKind::InvalidInput,
            FileOpenError::IoError(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Validate a file before attempting to open it
///
/// Checks:
/// - File exists
/// - Is not a directory
/// - Has read permissions
/// - Does not exceed `max_size` bytes
pub fn validate_file_for_opening(path: &Path, max_size: u64) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileOpenError::NotFound,
        io::ErrorKind::PermissionDenied => FileOpenError::PermissionDenied,
        _ => FileOpenError::IoError(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }

    if metadata.len() > max_size {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
            max_mb: max_size / (1024 * 1024),
        });
    }

    Ok(())
}

/// Get the filename from a path for display in tabs and messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_nonexistent_file() {
        let result =
            validate_file_for_opening(Path::new("/nonexistent/path/file.txt"), MAX_FILE_SIZE);
        assert!(matches!(result, Err(FileOpenError::NotFound)));
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_file_for_opening(dir.path(), MAX_FILE_SIZE);
        assert!(matches!(result, Err(FileOpenError::IsDirectory)));
    }

    #[test]
    fn test_validate_valid_file() {
        let temp = NamedTempFile::new().unwrap();
        let result = validate_file_for_opening(temp.path(), MAX_FILE_SIZE);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_too_large() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"0123456789").unwrap();
        temp.flush().unwrap();

        let result = validate_file_for_opening(temp.path(), 4);
        assert!(matches!(result, Err(FileOpenError::TooLarge { .. })));
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let err: io::Error = FileOpenError::NotFound.into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err: io::Error = FileOpenError::IsDirectory.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "is a directory");
    }

    #[test]
    fn test_filename_for_display() {
        assert_eq!(filename_for_display(Path::new("/tmp/notes.txt")), "notes.txt");
        assert_eq!(filename_for_display(Path::new("/")), "");
    }
}
