//! Event channel implementation using crossbeam-channel.
//!
//! Every pipeline stage holds a clone of the same [`EventSender`]; the
//! display owns the single [`EventReceiver`].

use crossbeam_channel::{bounded, Receiver, Sender};

use super::ProgressEvent;

/// Sends progress events from a pipeline stage.
///
/// This is a thin wrapper around crossbeam's Sender that can be
/// cloned and sent across threads.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<ProgressEvent>,
}

impl EventSender {
    /// Create a new EventSender from a raw crossbeam sender.
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { inner: sender }
    }

    /// Send an event, blocking while the channel is full.
    ///
    /// If the receiver is dropped, the event is silently discarded so a
    /// display that stops listening never stalls the pipeline.
    pub fn send(&self, event: ProgressEvent) {
        let _ = self.inner.send(event);
    }
}

/// Receives progress events on the display side.
pub struct EventReceiver {
    inner: Receiver<ProgressEvent>,
}

impl EventReceiver {
    /// Block until the next event is received.
    ///
    /// Returns `None` once every sender has been dropped.
    pub fn recv(&self) -> Option<ProgressEvent> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<ProgressEvent> {
        self.inner.try_recv().ok()
    }

    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = ProgressEvent> + '_ {
        self.inner.iter()
    }
}

/// Constructor for the shared progress stream.
pub struct EventChannel;

impl EventChannel {
    /// Create a bounded event channel with the specified capacity.
    ///
    /// A full channel blocks the sending stage until the display catches up.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender whose receiver is already gone.
///
/// Useful for tests and for running a stage without a display.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::bounded(1);
    sender
}
