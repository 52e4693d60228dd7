//! Error types for the explorer data client.
//!
//! # Design
//! Errors carry no structured code beyond what a page needs to decide how to
//! render. Any non-2xx on a collection fetch collapses into `Status`, whose
//! message is the generic "Error fetching data". `NotFound` is kept apart
//! because the post detail page renders a missing post as "not found" rather
//! than as an error. `Clone` is required because every waiter on a shared
//! in-flight request observes the same failure.

use thiserror::Error;

/// Errors returned by the remote data client and the request cache.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The transport layer failed before a response was received.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned a non-success status.
    #[error("Error fetching data")]
    Status { status: u16 },

    /// A single-item request returned 404.
    #[error("resource not found")]
    NotFound,

    /// The response body could not be decoded into the expected type.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for failures that describe a missing resource rather than a
    /// broken fetch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound)
    }
}
