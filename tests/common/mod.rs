//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use tabula::fs::FileSystem;
use tabula::{DocumentSession, SessionEvent};

// ============================================================================
// In-memory filesystem
// ============================================================================

#[derive(Debug, Default)]
struct MemoryFsState {
    files: HashMap<PathBuf, String>,
    failing_reads: HashSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
    failing_creates: HashSet<PathBuf>,
}

/// In-memory [`FileSystem`] with failure injection.
///
/// Clones share the same state, so a test can keep a handle after giving
/// one to the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Rc<RefCell<MemoryFsState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, text: &str) -> Self {
        self.put(path, text);
        self
    }

    pub fn put(&self, path: &str, text: &str) {
        self.state
            .borrow_mut()
            .files
            .insert(PathBuf::from(path), text.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.state.borrow().files.get(Path::new(path)).cloned()
    }

    pub fn fail_reads_from(&self, path: &str) {
        self.state
            .borrow_mut()
            .failing_reads
            .insert(PathBuf::from(path));
    }

    pub fn fail_writes_to(&self, path: &str) {
        self.state
            .borrow_mut()
            .failing_writes
            .insert(PathBuf::from(path));
    }

    pub fn fail_creates_at(&self, path: &str) {
        self.state
            .borrow_mut()
            .failing_creates
            .insert(PathBuf::from(path));
    }

    pub fn heal(&self) {
        let mut state = self.state.borrow_mut();
        state.failing_reads.clear();
        state.failing_writes.clear();
        state.failing_creates.clear();
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.state.borrow().files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self.state.borrow();
        if state.failing_reads.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied"));
        }
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.failing_writes.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied"));
        }
        state.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn create_empty(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.failing_creates.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "create denied"));
        }
        if state.files.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        state.files.insert(path.to_path_buf(), String::new());
        Ok(())
    }
}

// ============================================================================
// Session builders
// ============================================================================

/// Session over `fs` whose events land in the returned receiver
pub fn memory_session(fs: &MemoryFs) -> (DocumentSession, Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel();
    let session = DocumentSession::new()
        .with_file_system(fs.clone())
        .with_sink(tx);
    (session, rx)
}

/// Session over the real filesystem whose events land in the returned receiver
pub fn os_session() -> (DocumentSession, Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel();
    (DocumentSession::new().with_sink(tx), rx)
}

/// Drain every pending event
pub fn drain(rx: &Receiver<SessionEvent>) -> Vec<SessionEvent> {
    rx.try_iter().collect()
}

/// Write `text` to `name` inside `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}
