//! Document session - the ordered set of open documents and the active one
//!
//! Documents are addressed by their position in tab order. Positions shift
//! when a document before them closes, so callers re-derive indices after
//! every [`SessionEvent::CollectionChanged`] (or hold a [`DocumentId`] and
//! look it up with [`DocumentSession::index_of`]).

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::buffer::{BufferChange, EditStatus, TextBuffer};
use super::document::{DocumentEntry, DocumentId};
use crate::config::SessionConfig;
use crate::decorate::ContentDecorator;
use crate::error::SessionError;
use crate::events::{EventSink, NullSink, SessionEvent};
use crate::fs::{FileSystem, OsFileSystem};

/// Successful result of a session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed
    Changed,
    /// The request was valid but there was nothing to do
    Unchanged,
}

pub type SessionResult = Result<Outcome, SessionError>;

/// Owns every open document and tracks which one is active
pub struct DocumentSession {
    documents: Vec<DocumentEntry>,
    active_index: Option<usize>,
    /// Folder `create_new` resolves names against
    working_folder: Option<PathBuf>,
    history_limit: Option<usize>,
    next_document_id: u64,
    fs: Box<dyn FileSystem>,
    sink: Box<dyn EventSink>,
    decorator: Option<Box<dyn ContentDecorator>>,
}

impl fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSession")
            .field("documents", &self.documents)
            .field("active_index", &self.active_index)
            .field("working_folder", &self.working_folder)
            .field("history_limit", &self.history_limit)
            .field("has_decorator", &self.decorator.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSession {
    /// Create an empty session on the real filesystem with no event sink
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active_index: None,
            working_folder: None,
            history_limit: None,
            next_document_id: 1,
            fs: Box::new(OsFileSystem::default()),
            sink: Box::new(NullSink),
            decorator: None,
        }
    }

    /// Create an empty session configured from `config`
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            working_folder: config.working_folder.clone(),
            history_limit: config.history_limit,
            fs: Box::new(OsFileSystem::new(config.max_file_size)),
            ..Self::new()
        }
    }

    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_decorator(mut self, decorator: impl ContentDecorator + 'static) -> Self {
        self.decorator = Some(Box::new(decorator));
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the file at `path` and make it active.
    ///
    /// Opening a path that is already open activates the existing entry and
    /// returns [`Outcome::Unchanged`].
    pub fn open(&mut self, path: impl AsRef<Path>) -> SessionResult {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            return self.fail(SessionError::NotFound(path.to_path_buf()));
        }

        if let Some(existing) = self.index_of_path(path) {
            tracing::debug!(path = %path.display(), index = existing, "already open, activating");
            self.set_active(Some(existing));
            return Ok(Outcome::Unchanged);
        }

        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(source) => {
                return self.fail(SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut buffer = TextBuffer::with_history_limit(self.history_limit);
        buffer.load_from(&text);
        let id = self.allocate_id();
        self.documents.push(DocumentEntry::new(id, buffer, path.to_path_buf()));
        let index = self.documents.len() - 1;

        tracing::info!(path = %path.display(), index, ?id, "opened document");
        self.decorate(index, true);
        self.sink.emit(SessionEvent::CollectionChanged);
        self.set_active(Some(index));
        Ok(Outcome::Changed)
    }

    /// Close the document at `index`.
    ///
    /// A dirty document is never closed; save or [`revert`](Self::revert) it
    /// first.
    pub fn close(&mut self, index: usize) -> SessionResult {
        self.check_index(index)?;
        if self.documents[index].is_dirty() {
            let name = self.documents[index].display_name().to_string();
            return self.fail(SessionError::UnsavedChanges { index, name });
        }

        let remaining = self.documents.len() - 1;
        let (new_active, active_moved) = match self.active_index {
            Some(active) if active == index => {
                let next = (remaining > 0).then(|| index.min(remaining - 1));
                (next, true)
            }
            Some(active) if active > index => (Some(active - 1), true),
            other => (other, false),
        };

        let entry = self.documents.remove(index);
        self.active_index = new_active;
        if let Some(decorator) = self.decorator.as_mut() {
            decorator.detach(entry.id());
        }

        tracing::info!(path = %entry.file_path().display(), index, "closed document");
        self.sink.emit(SessionEvent::CollectionChanged);
        if active_moved {
            self.sink.emit(SessionEvent::ActiveChanged(new_active));
        }
        Ok(Outcome::Changed)
    }

    /// Write the document at `index` to its file and mark it saved
    pub fn save(&mut self, index: usize) -> SessionResult {
        self.check_index(index)?;
        let path = self.documents[index].file_path().to_path_buf();
        self.write_entry(index, &path)?;

        let change = self.documents[index].buffer_mut().mark_saved();
        tracing::info!(path = %path.display(), index, "saved document");
        self.report(index, change);
        Ok(Outcome::Changed)
    }

    /// Write the document at `index` to `new_path` and retarget the entry to it
    pub fn save_as(&mut self, index: usize, new_path: impl AsRef<Path>) -> SessionResult {
        self.check_index(index)?;
        let new_path = new_path.as_ref();
        if self
            .index_of_path(new_path)
            .is_some_and(|other| other != index)
        {
            return self.fail(SessionError::AlreadyOpen(new_path.to_path_buf()));
        }
        self.write_entry(index, new_path)?;

        let entry = &mut self.documents[index];
        let change = entry.buffer_mut().mark_saved();
        let extension_changed = entry.file_path().extension() != new_path.extension();
        entry.set_file_path(new_path.to_path_buf());

        tracing::info!(path = %new_path.display(), index, "saved document as");
        if extension_changed {
            self.decorate(index, true);
        }
        self.report(index, change);
        self.sink.emit(SessionEvent::CollectionChanged);
        Ok(Outcome::Changed)
    }

    /// Create an empty file named `name` in the working folder and open it.
    ///
    /// `name` must be relative and may not contain `..`, so the file always
    /// lands inside the folder. Other names fail with a write error.
    pub fn create_new(&mut self, name: &str) -> SessionResult {
        let relative = Path::new(name);
        let contained = relative.components().next().is_some()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return self.fail(SessionError::Write {
                path: relative.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "name must be a relative path inside the working folder",
                ),
            });
        }
        let path = match &self.working_folder {
            Some(folder) => folder.join(name),
            None => PathBuf::from(name),
        };
        if self.fs.exists(&path) {
            return self.fail(SessionError::AlreadyExists(path));
        }
        if let Err(source) = self.fs.create_empty(&path) {
            return self.fail(SessionError::Write { path, source });
        }
        tracing::debug!(path = %path.display(), "created empty file");
        self.open(&path)
    }

    /// Discard unsaved changes by reloading the document from disk.
    ///
    /// The edit history is dropped. On a read failure the buffer is untouched.
    pub fn revert(&mut self, index: usize) -> SessionResult {
        self.check_index(index)?;
        let path = self.documents[index].file_path().to_path_buf();
        let text = match self.fs.read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return self.fail(SessionError::Read { path, source }),
        };

        let change = self.documents[index].buffer_mut().load_from(&text);
        tracing::info!(path = %path.display(), index, "reverted document");
        self.report(index, change);
        Ok(Outcome::Changed)
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Full content of the document at `index`
    pub fn content(&self, index: usize) -> Result<&str, SessionError> {
        self.documents
            .get(index)
            .map(|entry| entry.buffer().content())
            .ok_or_else(|| SessionError::InvalidIndex {
                index,
                count: self.documents.len(),
            })
    }

    /// Replace the content of the document at `index` as one undoable edit
    pub fn set_content(&mut self, index: usize, text: &str) -> SessionResult {
        self.check_index(index)?;
        let status = self.documents[index].buffer_mut().set_content(text);
        Ok(self.apply_status(index, status))
    }

    /// Undo the last edit of the document at `index`
    pub fn undo(&mut self, index: usize) -> SessionResult {
        self.check_index(index)?;
        let status = self.documents[index].buffer_mut().undo();
        Ok(self.apply_status(index, status))
    }

    /// Redo the last undone edit of the document at `index`
    pub fn redo(&mut self, index: usize) -> SessionResult {
        self.check_index(index)?;
        let status = self.documents[index].buffer_mut().redo();
        Ok(self.apply_status(index, status))
    }

    // ========================================================================
    // Active document and working folder
    // ========================================================================

    /// Select the active document.
    ///
    /// `None` clears the selection. An out-of-range index is ignored.
    pub fn set_active(&mut self, index: Option<usize>) -> Outcome {
        if self.active_index == index {
            return Outcome::Unchanged;
        }
        if index.is_some_and(|i| i >= self.documents.len()) {
            tracing::debug!(
                ?index,
                count = self.documents.len(),
                "ignoring out-of-range activation"
            );
            return Outcome::Unchanged;
        }
        self.active_index = index;
        self.sink.emit(SessionEvent::ActiveChanged(index));
        Outcome::Changed
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_entry(&self) -> Option<&DocumentEntry> {
        self.active_index.and_then(|i| self.documents.get(i))
    }

    pub fn working_folder(&self) -> Option<&Path> {
        self.working_folder.as_deref()
    }

    pub fn set_working_folder(&mut self, folder: Option<PathBuf>) -> Outcome {
        if self.working_folder == folder {
            return Outcome::Unchanged;
        }
        tracing::debug!(?folder, "working folder changed");
        self.working_folder = folder.clone();
        self.sink.emit(SessionEvent::WorkingFolderChanged(folder));
        Outcome::Changed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Open documents in tab order
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.documents
    }

    pub fn entry(&self, index: usize) -> Option<&DocumentEntry> {
        self.documents.get(index)
    }

    pub fn buffer(&self, index: usize) -> Option<&TextBuffer> {
        self.documents.get(index).map(DocumentEntry::buffer)
    }

    /// Display names in tab order
    pub fn open_file_names(&self) -> Vec<&str> {
        self.documents.iter().map(|e| e.display_name()).collect()
    }

    pub fn file_name(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(|e| e.display_name())
    }

    pub fn file_path(&self, index: usize) -> Option<&Path> {
        self.documents.get(index).map(|e| e.file_path())
    }

    pub fn extension(&self, index: usize) -> Option<&str> {
        self.documents.get(index).and_then(|e| e.extension())
    }

    /// Whether the document at `index` has unsaved changes; false for an invalid index
    pub fn is_dirty(&self, index: usize) -> bool {
        self.documents.get(index).is_some_and(|e| e.is_dirty())
    }

    /// Current position of the document with `id`
    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|e| e.id() == id)
    }

    /// Current position of the document open at `path`
    pub fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.documents.iter().position(|e| e.file_path() == path)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;
        id
    }

    fn check_index(&mut self, index: usize) -> Result<(), SessionError> {
        if index < self.documents.len() {
            return Ok(());
        }
        let count = self.documents.len();
        self.fail(SessionError::InvalidIndex { index, count })
    }

    /// Log and broadcast a failure, then hand it back to the caller
    fn fail<T>(&mut self, err: SessionError) -> Result<T, SessionError> {
        tracing::warn!(kind = %err.kind(), "{}", err);
        self.sink.emit(SessionEvent::Error {
            kind: err.kind(),
            context: err.context(),
        });
        Err(err)
    }

    fn write_entry(&mut self, index: usize, path: &Path) -> Result<(), SessionError> {
        let content = self.documents[index].buffer().content();
        match self.fs.write(path, content) {
            Ok(()) => Ok(()),
            Err(source) => self.fail(SessionError::Write {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn apply_status(&mut self, index: usize, status: EditStatus) -> Outcome {
        match status {
            EditStatus::Applied(change) => {
                self.report(index, change);
                Outcome::Changed
            }
            EditStatus::Unchanged | EditStatus::OutOfRange => Outcome::Unchanged,
        }
    }

    /// Turn a buffer change report into notifications
    fn report(&mut self, index: usize, change: BufferChange) {
        if change.content_changed {
            self.decorate(index, false);
            self.sink.emit(SessionEvent::ContentChanged(index));
        }
        if let Some(dirty) = change.dirty_changed {
            self.sink.emit(SessionEvent::DirtyChanged(index, dirty));
        }
        if let Some(lines) = change.line_count_changed {
            self.sink.emit(SessionEvent::LineCountChanged(index, lines));
        }
    }

    fn decorate(&mut self, index: usize, attach: bool) {
        let Some(decorator) = self.decorator.as_mut() else {
            return;
        };
        let entry = &self.documents[index];
        let content = entry.buffer().content();
        let result = if attach {
            decorator.attach(entry.id(), entry.extension(), content)
        } else {
            decorator.content_changed(entry.id(), content)
        };
        if let Err(e) = result {
            tracing::warn!(index, "decorator failed: {}", e);
        }
    }
}
