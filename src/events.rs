//! Session notifications for the presentation layer
//!
//! Events are observational only: the session emits them synchronously after
//! each committed mutation and never reads anything back from the sink.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::error::ErrorKind;

/// Something observable changed in a [`DocumentSession`](crate::model::DocumentSession)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The set or order of open documents changed, or an entry was renamed.
    /// Any index held by the receiver must be re-derived.
    CollectionChanged,
    /// The active document changed
    ActiveChanged(Option<usize>),
    /// Content of the document at this index changed
    ContentChanged(usize),
    /// Dirty flag of the document at this index flipped
    DirtyChanged(usize, bool),
    /// Line count of the document at this index changed
    LineCountChanged(usize, usize),
    /// The folder used by `create_new` changed
    WorkingFolderChanged(Option<PathBuf>),
    /// An operation failed
    Error { kind: ErrorKind, context: String },
}

/// Receiver of session events
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SessionEvent) {}
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

/// Forward events over a channel; a disconnected receiver is ignored
impl EventSink for Sender<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        if self.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

/// Adapter turning a closure into an [`EventSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(SessionEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: SessionEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, rx) = mpsc::channel();
        let mut sink = tx;
        sink.emit(SessionEvent::CollectionChanged);
        sink.emit(SessionEvent::ActiveChanged(Some(0)));

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                SessionEvent::CollectionChanged,
                SessionEvent::ActiveChanged(Some(0))
            ]
        );
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = tx;
        sink.emit(SessionEvent::CollectionChanged);
    }

    #[test]
    fn test_fn_sink_counts() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_event: SessionEvent| count += 1);
            sink.emit(SessionEvent::ContentChanged(0));
            sink.emit(SessionEvent::ContentChanged(1));
        }
        assert_eq!(count, 2);
    }
}
