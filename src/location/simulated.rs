//! Scriptable in-memory location source.

use std::time::Duration;

use super::source::{FixListener, LocationSource};
use super::types::{Fix, LocationPriority};

/// A location source driven entirely by its caller.
///
/// Used by the scenario runner and by tests to stand in for a device
/// location stack.
#[derive(Debug)]
pub struct SimulatedLocationSource {
    started: bool,
    available: bool,
    listener: Option<FixListener>,
    last: Option<Fix>,
    priority: Option<LocationPriority>,
    intervals: Option<(Duration, Duration)>,
    start_calls: usize,
    stop_calls: usize,
}

impl Default for SimulatedLocationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedLocationSource {
    /// Create a stopped source whose providers are enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: false,
            available: true,
            listener: None,
            last: None,
            priority: None,
            intervals: None,
            start_calls: 0,
            stop_calls: 0,
        }
    }

    /// Enable or disable all location providers.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Produce a fix as the device would.
    ///
    /// The fix becomes the last known location. It is delivered only while
    /// the source is started and a listener is registered; returns whether
    /// it was delivered.
    pub fn emit(&mut self, fix: Fix) -> bool {
        self.last = Some(fix.clone());
        match (&self.listener, self.started) {
            (Some(listener), true) => listener.deliver(fix),
            _ => {
                tracing::trace!("Simulated source not delivering, no active listener");
                false
            }
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    #[must_use]
    pub fn priority(&self) -> Option<LocationPriority> {
        self.priority
    }

    #[must_use]
    pub fn intervals(&self) -> Option<(Duration, Duration)> {
        self.intervals
    }

    /// Number of `start` calls observed.
    #[must_use]
    pub fn start_calls(&self) -> usize {
        self.start_calls
    }

    /// Number of `stop` calls observed.
    #[must_use]
    pub fn stop_calls(&self) -> usize {
        self.stop_calls
    }
}

impl LocationSource for SimulatedLocationSource {
    fn start(&mut self) {
        self.start_calls += 1;
        self.started = true;
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
        self.started = false;
    }

    fn request_location_updates(&mut self, listener: FixListener) {
        self.listener = Some(listener);
    }

    fn stop_location_updates(&mut self) {
        self.listener = None;
    }

    fn is_location_available(&self) -> bool {
        self.available
    }

    fn last_location(&self) -> Option<Fix> {
        self.last.clone()
    }

    fn set_priority(&mut self, priority: LocationPriority) {
        self.priority = Some(priority);
    }

    fn set_update_intervals(&mut self, interval: Duration, fastest: Duration) {
        self.intervals = Some((interval, fastest));
    }
}
