//! Tabula - document model and multi-document session core
//!
//! This crate provides the editing core of a plain-text editor: text buffers
//! with a linear undo/redo history, and a session that owns the open
//! documents, tracks the active one, and handles file I/O.

pub mod config;
pub mod config_paths;
pub mod decorate;
pub mod error;
pub mod events;
pub mod fs;
pub mod logging;
pub mod model;
pub mod util;

// Re-export commonly used types
pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError};
pub use events::{EventSink, SessionEvent};
pub use model::{DocumentSession, Outcome, TextBuffer};
