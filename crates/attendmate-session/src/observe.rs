//! Observable value container.
//!
//! UI code reads the current value synchronously and subscribes for updates;
//! every `set` notifies all live subscribers.

use tokio::sync::watch;

/// A single observable value.
///
/// Wraps a `watch` channel so the owner keeps the sender and hands out
/// receivers to subscribers. `get` is a synchronous snapshot; subscribers
/// use `receiver.changed().await` (or `has_changed`) to pick up writes.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify all subscribers.
    ///
    /// Subscribers are notified even when the new value equals the old one.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe to value changes.
    ///
    /// The receiver starts at the current value and sees every subsequent
    /// `set`.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
