//! Stateless HTTP request builder and response parser for the explorer API.
//!
//! # Design
//! `ExplorerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between, keeping
//! this module deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Resource;

/// Synchronous, stateless client for the explorer API.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self, resource: Resource) -> HttpRequest {
        HttpRequest::get(format!("{}/{}", self.base_url, resource.path()))
    }

    pub fn build_get(&self, resource: Resource, id: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/{}/{id}", self.base_url, resource.path()))
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        self.build_list(Resource::Posts)
    }

    pub fn build_get_post(&self, id: u32) -> HttpRequest {
        self.build_get(Resource::Posts, id)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.build_list(Resource::Users)
    }

    pub fn build_get_user(&self, id: u32) -> HttpRequest {
        self.build_get(Resource::Users, id)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.build_list(Resource::Todos)
    }

    pub fn build_list_albums(&self) -> HttpRequest {
        self.build_list(Resource::Albums)
    }

    /// Comments are always fetched as the full collection and filtered by
    /// post on the client.
    pub fn build_list_comments(&self) -> HttpRequest {
        self.build_list(Resource::Comments)
    }

    /// Parse a collection response. Every non-2xx status, 404 included,
    /// fails with the generic status error.
    pub fn parse_list<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, FetchError> {
        parse_json(response)
    }

    /// Parse a single-record response, reporting 404 as `NotFound`.
    pub fn parse_one<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, FetchError> {
        if response.status == 404 {
            return Err(FetchError::NotFound);
        }
        parse_json(response)
    }
}

/// Check the status and decode the body as JSON.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, FetchError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::Status {
        status: response.status,
    })
}
