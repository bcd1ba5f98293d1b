//! Utility modules

pub mod file_validation;

pub use file_validation::{filename_for_display, FileOpenError, MAX_FILE_SIZE};
