//! Trailing-edge debounced values.
//!
//! A `Debounced<T>` holds the last stable value plus at most one pending
//! value with a deadline. Every `set` pushes the deadline out again, so a
//! burst of edits stabilizes once, `delay` after the last edit. Time is
//! tokio's clock so tests can pause and advance it.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    stable: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            stable: initial,
            pending: None,
            delay,
        }
    }

    /// Record a raw value observed at `now`, cancelling any pending one.
    pub fn set(&mut self, value: T, now: Instant) {
        if value == self.stable {
            self.pending = None;
        } else {
            self.pending = Some((value, now + self.delay));
        }
    }

    /// Promote the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> &T {
        if self.pending.as_ref().is_some_and(|(_, deadline)| now >= *deadline) {
            if let Some((value, _)) = self.pending.take() {
                self.stable = value;
            }
        }
        &self.stable
    }

    /// Last stable value.
    pub fn value(&self) -> &T {
        &self.stable
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait out the current window and return the stabilized value.
    pub async fn settled(&mut self) -> &T {
        if let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) {
            sleep_until(deadline).await;
        }
        self.poll(Instant::now())
    }
}
