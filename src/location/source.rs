//! Location source contract and the fix delivery channel.
//!
//! A location source is started and stopped by exactly one owner. Fixes flow
//! back through a [`FixListener`], an unbounded single-producer channel: the
//! source holds the only live listener between `request_location_updates`
//! and `stop_location_updates`, and the owner drains the paired
//! [`FixChannel`] on its own execution context. Delivery is serialized, so
//! the owner never needs internal locking.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::types::{Fix, LocationPriority};

/// Something that can produce location fixes.
///
/// `start` is fire-and-forget: a source that confirms startup asynchronously
/// must not make the caller wait for it.
pub trait LocationSource {
    /// Begin acquiring location.
    fn start(&mut self);

    /// Stop acquiring location.
    fn stop(&mut self);

    /// Register the listener that receives fixes until updates are stopped.
    fn request_location_updates(&mut self, listener: FixListener);

    /// Stop delivering fixes and drop the registered listener.
    fn stop_location_updates(&mut self);

    /// Whether any location provider is currently enabled.
    fn is_location_available(&self) -> bool;

    /// The most recent fix the source has seen, if any.
    fn last_location(&self) -> Option<Fix>;

    /// Set the power/accuracy trade-off for subsequent requests.
    fn set_priority(&mut self, priority: LocationPriority);

    /// Set the desired and fastest update intervals.
    fn set_update_intervals(&mut self, interval: Duration, fastest: Duration);
}

/// Producer half of the fix delivery channel, handed to a location source.
#[derive(Debug)]
pub struct FixListener {
    tx: UnboundedSender<Fix>,
}

impl FixListener {
    /// Deliver a fix to the owner.
    ///
    /// Returns `false` if the owner has gone away.
    pub fn deliver(&self, fix: Fix) -> bool {
        self.tx.send(fix).is_ok()
    }
}

/// Consumer half of the fix delivery channel.
#[derive(Debug)]
pub struct FixChannel {
    tx: UnboundedSender<Fix>,
    rx: UnboundedReceiver<Fix>,
}

impl Default for FixChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl FixChannel {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Create a listener feeding this channel.
    #[must_use]
    pub fn listener(&self) -> FixListener {
        FixListener {
            tx: self.tx.clone(),
        }
    }

    /// Take the next delivered fix without waiting.
    pub fn try_next(&mut self) -> Option<Fix> {
        self.rx.try_recv().ok()
    }

    /// Drop every fix delivered so far, returning how many were dropped.
    pub fn discard(&mut self) -> usize {
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}
