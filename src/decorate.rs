//! Hook for read-only presentation decorations (e.g. syntax highlighting)
//!
//! A decorator is keyed on the document's file extension and follows its
//! content. The session calls it after each committed change and ignores
//! failures beyond logging them.

use crate::model::DocumentId;

pub type DecorateResult = Result<(), String>;

/// External component that decorates document content
pub trait ContentDecorator {
    /// A document was opened or its extension changed
    fn attach(&mut self, id: DocumentId, extension: Option<&str>, content: &str) -> DecorateResult;

    /// Content of an attached document changed
    fn content_changed(&mut self, id: DocumentId, content: &str) -> DecorateResult;

    /// The document was closed
    fn detach(&mut self, id: DocumentId);
}
