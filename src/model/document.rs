//! Document entry - one open file in the session

use std::path::{Path, PathBuf};

use super::buffer::TextBuffer;
use crate::util::filename_for_display;

/// Stable identifier for an open document, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// An open document: its buffer plus file metadata
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    id: DocumentId,
    buffer: TextBuffer,
    file_path: PathBuf,
    display_name: String,
}

impl DocumentEntry {
    pub(crate) fn new(id: DocumentId, buffer: TextBuffer, file_path: PathBuf) -> Self {
        let display_name = filename_for_display(&file_path);
        Self {
            id,
            buffer,
            file_path,
            display_name,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// File name shown in the tab
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// File extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.file_path.extension().and_then(|ext| ext.to_str())
    }

    /// Point the entry at a new file after a successful save-as
    pub(crate) fn set_file_path(&mut self, path: PathBuf) {
        self.display_name = filename_for_display(&path);
        self.file_path = path;
    }
}
