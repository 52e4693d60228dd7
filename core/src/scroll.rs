//! Infinite-scroll window growth.
//!
//! The visible count only grows, one step per completed load. A load in
//! flight blocks further loads until it completes, so repeated sentinel
//! events while loading are dropped rather than queued.

use std::time::Duration;

use tracing::debug;

use crate::sentinel::{SentinelEvent, SentinelRegistration};

pub const INITIAL_VISIBLE: usize = 24;
pub const STEP: usize = 24;
pub const STEP_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    visible: usize,
    step: usize,
    loading: bool,
    delay: Duration,
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self::new(INITIAL_VISIBLE, STEP, STEP_DELAY)
    }
}

impl InfiniteScroll {
    pub fn new(initial: usize, step: usize, delay: Duration) -> Self {
        Self {
            visible: initial,
            step,
            loading: false,
            delay,
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a growth step. False if one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Finish the step started by `begin`.
    pub fn complete(&mut self) {
        if self.loading {
            self.visible += self.step;
            self.loading = false;
            debug!(visible = self.visible, "infinite scroll grew");
        }
    }

    /// One full growth step including the artificial delay.
    pub async fn load_more(&mut self) -> bool {
        if !self.begin() {
            return false;
        }
        tokio::time::sleep(self.delay).await;
        self.complete();
        true
    }

    /// Take one growth step per queued sentinel entry. Entries reported
    /// while a step is running are discarded once it completes. Returns the
    /// number of steps taken.
    pub async fn follow(&mut self, sentinel: &mut SentinelRegistration) -> usize {
        let mut grown = 0;
        while let Some(SentinelEvent::BecameVisible) = sentinel.try_next() {
            if self.load_more().await {
                grown += 1;
            }
            let mut dropped = 0;
            while sentinel.try_next().is_some() {
                dropped += 1;
            }
            if dropped > 0 {
                debug!(dropped, "sentinel entries ignored while loading");
            }
        }
        grown
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    pub fn has_more(&self, len: usize) -> bool {
        self.visible < len
    }
}
