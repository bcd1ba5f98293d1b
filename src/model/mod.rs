//! Document model - text buffers, their edit history, and the session that owns them

pub mod buffer;
pub mod command;
pub mod document;
pub mod history;
pub mod session;

pub use buffer::{BufferChange, EditStatus, TextBuffer};
pub use command::EditCommand;
pub use document::{DocumentEntry, DocumentId};
pub use history::EditHistory;
pub use session::{DocumentSession, Outcome, SessionResult};
