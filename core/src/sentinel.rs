//! Visibility sentinels for infinite scroll.
//!
//! A page registers an invisible marker region with the `Viewport` and gets
//! back a `SentinelRegistration`. Whenever the host reports the region
//! crossing from hidden to visible, exactly one `BecameVisible` event is
//! queued on the registration. Dropping the registration unregisters the
//! region; reports for unknown regions are ignored.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentinelId(Uuid);

impl fmt::Display for SentinelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentinel-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelEvent {
    BecameVisible,
}

struct Region {
    visible: bool,
    events: mpsc::UnboundedSender<SentinelEvent>,
}

type Regions = Mutex<HashMap<SentinelId, Region>>;

/// Host-side registry of observed regions.
#[derive(Clone, Default)]
pub struct Viewport {
    regions: Arc<Regions>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("observed", &lock(&self.regions).len())
            .finish()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&self) -> SentinelRegistration {
        let id = SentinelId(Uuid::new_v4());
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.regions).insert(
            id,
            Region {
                visible: false,
                events: tx,
            },
        );
        SentinelRegistration {
            id,
            events: rx,
            regions: Arc::downgrade(&self.regions),
        }
    }

    /// Report the current visibility of a region. Returns true if this
    /// report produced a `BecameVisible` event.
    pub fn report(&self, id: SentinelId, visible: bool) -> bool {
        let mut regions = lock(&self.regions);
        let Some(region) = regions.get_mut(&id) else {
            return false;
        };
        let entered = visible && !region.visible;
        region.visible = visible;
        entered && region.events.send(SentinelEvent::BecameVisible).is_ok()
    }

    pub fn is_observed(&self, id: SentinelId) -> bool {
        lock(&self.regions).contains_key(&id)
    }
}

/// Page-side handle to one observed region.
pub struct SentinelRegistration {
    id: SentinelId,
    events: mpsc::UnboundedReceiver<SentinelEvent>,
    regions: Weak<Regions>,
}

impl fmt::Debug for SentinelRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelRegistration").field("id", &self.id).finish()
    }
}

impl SentinelRegistration {
    pub fn id(&self) -> SentinelId {
        self.id
    }

    /// Next queued event, if any, without waiting.
    pub fn try_next(&mut self) -> Option<SentinelEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. `None` once the viewport is gone.
    pub async fn next(&mut self) -> Option<SentinelEvent> {
        self.events.recv().await
    }
}

impl Drop for SentinelRegistration {
    fn drop(&mut self) {
        if let Some(regions) = self.regions.upgrade() {
            lock(&regions).remove(&self.id);
        }
    }
}

fn lock(regions: &Regions) -> MutexGuard<'_, HashMap<SentinelId, Region>> {
    regions.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_event_per_entry_into_view() {
        let viewport = Viewport::new();
        let mut sentinel = viewport.observe();

        assert!(viewport.report(sentinel.id(), true));
        assert!(!viewport.report(sentinel.id(), true));
        assert_eq!(sentinel.try_next(), Some(SentinelEvent::BecameVisible));
        assert_eq!(sentinel.try_next(), None);

        assert!(!viewport.report(sentinel.id(), false));
        assert!(viewport.report(sentinel.id(), true));
        assert_eq!(sentinel.try_next(), Some(SentinelEvent::BecameVisible));
    }

    #[test]
    fn dropping_registration_unregisters() {
        let viewport = Viewport::new();
        let sentinel = viewport.observe();
        let id = sentinel.id();
        assert!(viewport.is_observed(id));

        drop(sentinel);
        assert!(!viewport.is_observed(id));
        assert!(!viewport.report(id, true));
    }

    #[tokio::test]
    async fn next_waits_for_event() {
        let viewport = Viewport::new();
        let mut sentinel = viewport.observe();
        let id = sentinel.id();
        let host = viewport.clone();
        tokio::spawn(async move {
            host.report(id, true);
        });
        assert_eq!(sentinel.next().await, Some(SentinelEvent::BecameVisible));
    }
}
