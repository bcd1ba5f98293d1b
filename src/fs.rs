//! Filesystem access used by the document session
//!
//! Text is read and written as UTF-8 without BOM handling or line-ending
//! normalization, so content round-trips byte for byte.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::util::file_validation::validate_file_for_opening;
use crate::util::MAX_FILE_SIZE;

/// The file operations a session needs
pub trait FileSystem {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file's content with `text`, creating it if needed
    fn write(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Create an empty file, failing if one already exists
    fn create_empty(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
///
/// Reads refuse directories and files over `max_file_size` bytes. Any valid
/// UTF-8 is accepted, NUL bytes included.
#[derive(Debug, Clone, Copy)]
pub struct OsFileSystem {
    pub max_file_size: u64,
}

impl Default for OsFileSystem {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl OsFileSystem {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        validate_file_for_opening(path, self.max_file_size)?;
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    fn create_empty(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(drop)
    }
}
