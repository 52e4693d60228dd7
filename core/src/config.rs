//! Runtime configuration.
//!
//! Defaults point at the public demo API. Each base URL can be overridden
//! from the environment, which is how tests and demos target the mock
//! server.

use std::time::Duration;

use crate::scroll;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_GEOCODE_BASE: &str = "https://geocode.xyz";
pub const DEFAULT_FLAG_CDN: &str = "https://flagcdn.com/w40";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub geocode_base: String,
    pub flag_cdn: String,
    pub debounce: Duration,
    pub scroll_initial: usize,
    pub scroll_step: usize,
    pub scroll_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            geocode_base: DEFAULT_GEOCODE_BASE.to_string(),
            flag_cdn: DEFAULT_FLAG_CDN.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            scroll_initial: scroll::INITIAL_VISIBLE,
            scroll_step: scroll::STEP,
            scroll_delay: scroll::STEP_DELAY,
        }
    }
}

impl Config {
    /// Defaults overridden by `EXPLORER_API_BASE`, `EXPLORER_GEOCODE_BASE`
    /// and `EXPLORER_FLAG_CDN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base) = lookup("EXPLORER_API_BASE") {
            config.api_base = base;
        }
        if let Some(base) = lookup("EXPLORER_GEOCODE_BASE") {
            config.geocode_base = base;
        }
        if let Some(cdn) = lookup("EXPLORER_FLAG_CDN") {
            config.flag_cdn = cdn;
        }
        config
    }

    /// Same settings against a different API, e.g. a local mock server.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_geocode_base(mut self, base: impl Into<String>) -> Self {
        self.geocode_base = base.into();
        self
    }

    pub fn scroll(&self) -> scroll::InfiniteScroll {
        scroll::InfiniteScroll::new(self.scroll_initial, self.scroll_step, self.scroll_delay)
    }
}
