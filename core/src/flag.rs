//! Country flag cell resolved lazily from coordinates.
//!
//! # Design
//! A `FlagCell` starts as a placeholder. The first hover starts one
//! reverse-geocode lookup; hovers while it is in flight or after it resolved
//! do nothing. The lookup task holds only a weak reference to the cell's
//! state, so a cell dropped mid-lookup is never written to. Lookup failures
//! are logged and the cell returns to the placeholder.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::http::HttpRequest;
use crate::transport::{fetch_json, Transport};
use crate::types::{GeocodeResponse, Geo};

/// Reverse geocoder: coordinates to ISO country code.
#[derive(Clone)]
pub struct Geocoder {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl Geocoder {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn build_lookup(&self, lat: &str, lng: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/{lat},{lng}?json=1", self.base_url))
    }

    pub async fn country_code(&self, lat: &str, lng: &str) -> Result<String, FetchError> {
        let response: GeocodeResponse =
            fetch_json(self.transport.as_ref(), self.build_lookup(lat, lng)).await?;
        response
            .country_code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| FetchError::Decode("missing countryCode".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagState {
    Placeholder,
    Loading,
    Resolved(String),
}

#[derive(Debug)]
pub struct FlagCell {
    lat: String,
    lng: String,
    flag_cdn: String,
    state: Arc<Mutex<FlagState>>,
}

impl FlagCell {
    pub fn new(geo: &Geo, flag_cdn: &str) -> Self {
        Self {
            lat: geo.lat.clone(),
            lng: geo.lng.clone(),
            flag_cdn: flag_cdn.trim_end_matches('/').to_string(),
            state: Arc::new(Mutex::new(FlagState::Placeholder)),
        }
    }

    pub fn state(&self) -> FlagState {
        lock(&self.state).clone()
    }

    /// Start the lookup unless one is running or already succeeded.
    pub fn hover(&self, geocoder: &Geocoder) -> Option<JoinHandle<()>> {
        {
            let mut state = lock(&self.state);
            if *state != FlagState::Placeholder {
                return None;
            }
            *state = FlagState::Loading;
        }

        let cell: Weak<Mutex<FlagState>> = Arc::downgrade(&self.state);
        let geocoder = geocoder.clone();
        let (lat, lng) = (self.lat.clone(), self.lng.clone());
        Some(tokio::spawn(async move {
            let result = geocoder.country_code(&lat, &lng).await;
            let Some(cell) = cell.upgrade() else {
                debug!(%lat, %lng, "flag cell dropped before lookup resolved");
                return;
            };
            *lock(&cell) = match result {
                Ok(code) => FlagState::Resolved(code),
                Err(err) => {
                    warn!(%lat, %lng, error = %err, "Error fetching geo data");
                    FlagState::Placeholder
                }
            };
        }))
    }

    pub fn flag_url(&self, code: &str) -> String {
        format!("{}/{}.png", self.flag_cdn, code.to_lowercase())
    }

    pub fn render(&self) -> String {
        match self.state() {
            FlagState::Placeholder => "🌍".to_string(),
            FlagState::Loading => "Loading...".to_string(),
            FlagState::Resolved(code) => self.flag_url(&code),
        }
    }
}

fn lock(state: &Mutex<FlagState>) -> MutexGuard<'_, FlagState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::http::HttpResponse;

    struct FakeGeocode {
        calls: AtomicUsize,
        body: &'static str,
    }

    #[async_trait]
    impl Transport for FakeGeocode {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            assert!(request.url.ends_with("?json=1"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    fn setup(body: &'static str) -> (Arc<FakeGeocode>, Geocoder, FlagCell) {
        let transport = Arc::new(FakeGeocode {
            calls: AtomicUsize::new(0),
            body,
        });
        let geocoder = Geocoder::new("https://geocode.test", transport.clone());
        let geo = Geo {
            lat: "-37.3159".to_string(),
            lng: "81.1496".to_string(),
        };
        (transport, geocoder, FlagCell::new(&geo, "https://flags.test/w40"))
    }

    #[test]
    fn lookup_url_is_lat_then_lng() {
        let (_, geocoder, _) = setup("{}");
        assert_eq!(
            geocoder.build_lookup("-37.3159", "81.1496").url,
            "https://geocode.test/-37.3159,81.1496?json=1"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hover_resolves_once() {
        let (transport, geocoder, cell) = setup(r#"{"countryCode":"AU"}"#);
        assert_eq!(cell.render(), "🌍");

        let task = cell.hover(&geocoder).unwrap();
        assert_eq!(cell.render(), "Loading...");
        assert!(cell.hover(&geocoder).is_none());
        task.await.unwrap();

        assert_eq!(cell.state(), FlagState::Resolved("AU".to_string()));
        assert_eq!(cell.render(), "https://flags.test/w40/au.png");
        assert!(cell.hover(&geocoder).is_none());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_falls_back_to_placeholder() {
        let (_, geocoder, cell) = setup(r#"{"error":"Throttled! See geocode.xyz/pricing"}"#);
        cell.hover(&geocoder).unwrap().await.unwrap();
        assert_eq!(cell.state(), FlagState::Placeholder);
        assert_eq!(cell.render(), "🌍");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_cell_is_not_written() {
        let (transport, geocoder, cell) = setup(r#"{"countryCode":"AU"}"#);
        let weak = Arc::downgrade(&cell.state);
        let task = cell.hover(&geocoder).unwrap();
        drop(cell);
        task.await.unwrap();
        assert!(weak.upgrade().is_none());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }
}
