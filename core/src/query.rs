//! Resource queries: typed, cached access to the explorer collections.
//!
//! `Resources` is the service pages are handed. It pairs the stateless
//! `ExplorerClient` with a `Transport` and a shared `QueryCache`, and exposes
//! one query per resource keyed by a stable cache key.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheLookup, QueryCache, QueryKey};
use crate::client::ExplorerClient;
use crate::error::FetchError;
use crate::transport::Transport;
use crate::types::{Album, Comment, Post, Record, Todo, User};

/// Snapshot of a query as a page sees it.
#[derive(Debug)]
pub enum QueryState<T> {
    Loading,
    Ready(Arc<T>),
    Failed(String),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Loading => QueryState::Loading,
            QueryState::Ready(data) => QueryState::Ready(data.clone()),
            QueryState::Failed(msg) => QueryState::Failed(msg.clone()),
        }
    }
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

impl<T> From<Result<Arc<T>, FetchError>> for QueryState<T> {
    fn from(result: Result<Arc<T>, FetchError>) -> Self {
        match result {
            Ok(data) => QueryState::Ready(data),
            Err(err) => QueryState::Failed(err.to_string()),
        }
    }
}

impl<T> From<CacheLookup<T>> for QueryState<T> {
    fn from(lookup: CacheLookup<T>) -> Self {
        match lookup {
            CacheLookup::Missing | CacheLookup::Pending => QueryState::Loading,
            CacheLookup::Ready(data) => QueryState::Ready(data),
            CacheLookup::Failed(err) => QueryState::Failed(err.to_string()),
        }
    }
}

/// Cached access to every resource the explorer reads.
#[derive(Clone)]
pub struct Resources {
    client: ExplorerClient,
    transport: Arc<dyn Transport>,
    cache: QueryCache,
}

impl fmt::Debug for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("client", &self.client)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Resources {
    pub fn new(client: ExplorerClient, transport: Arc<dyn Transport>, cache: QueryCache) -> Self {
        Self {
            client,
            transport,
            cache,
        }
    }

    pub fn list_key<T: Record>() -> QueryKey {
        QueryKey::new(T::RESOURCE.cache_key())
    }

    pub fn item_key<T: Record>(id: u32) -> QueryKey {
        QueryKey::new(format!("{}/{id}", T::RESOURCE.item_key_prefix()))
    }

    /// Full collection of `T`, fetched once per cache lifetime.
    pub async fn list<T: Record>(&self) -> Result<Arc<Vec<T>>, FetchError> {
        let key = Self::list_key::<T>();
        self.cache
            .get_or_fetch(&key, move || async move {
                let request = self.client.build_list(T::RESOURCE);
                debug!(url = %request.url, "dispatching request");
                let response = self.transport.execute(request).await?;
                self.client.parse_list::<T>(response)
            })
            .await
    }

    /// Single record of `T` by id.
    pub async fn item<T: Record>(&self, id: u32) -> Result<Arc<T>, FetchError> {
        let key = Self::item_key::<T>(id);
        self.cache
            .get_or_fetch(&key, move || async move {
                let request = self.client.build_get(T::RESOURCE, id);
                debug!(url = %request.url, "dispatching request");
                let response = self.transport.execute(request).await?;
                self.client.parse_one::<T>(response)
            })
            .await
    }

    /// Fetch (or reuse) the collection and report it as a page snapshot.
    pub async fn load<T: Record>(&self) -> QueryState<Vec<T>> {
        self.list::<T>().await.into()
    }

    /// Current snapshot of the collection without fetching.
    pub fn state<T: Record>(&self) -> QueryState<Vec<T>> {
        self.cache.peek::<Vec<T>>(&Self::list_key::<T>()).into()
    }

    pub async fn posts(&self) -> Result<Arc<Vec<Post>>, FetchError> {
        self.list().await
    }

    pub async fn users(&self) -> Result<Arc<Vec<User>>, FetchError> {
        self.list().await
    }

    pub async fn todos(&self) -> Result<Arc<Vec<Todo>>, FetchError> {
        self.list().await
    }

    pub async fn albums(&self) -> Result<Arc<Vec<Album>>, FetchError> {
        self.list().await
    }

    pub async fn comments(&self) -> Result<Arc<Vec<Comment>>, FetchError> {
        self.list().await
    }

    pub async fn post(&self, id: u32) -> Result<Arc<Post>, FetchError> {
        self.item(id).await
    }

    pub async fn user(&self, id: u32) -> Result<Arc<User>, FetchError> {
        self.item(id).await
    }
}
