//! Domain DTOs for the explorer API.
//!
//! # Design
//! These types mirror the public demo API's schema (camelCase on the wire)
//! and are defined independently of the mock-server crate; integration
//! tests catch any schema drift between the two. Records are never mutated
//! after they are fetched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The collections served by the explorer API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Users,
    Todos,
    Albums,
    Comments,
}

impl Resource {
    /// Path segment of the collection endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Users => "users",
            Resource::Todos => "todos",
            Resource::Albums => "albums",
            Resource::Comments => "comments",
        }
    }

    /// Prefix of the cache key for one record, as in `post/{id}`.
    pub fn item_key_prefix(self) -> &'static str {
        match self {
            Resource::Posts => "post",
            Resource::Users => "user",
            Resource::Todos => "todo",
            Resource::Albums => "album",
            Resource::Comments => "comment",
        }
    }

    /// Stable cache key for the full collection.
    pub fn cache_key(self) -> &'static str {
        match self {
            Resource::Posts => "postsData",
            Resource::Users => "usersData",
            Resource::Todos => "todosData",
            Resource::Albums => "albumsData",
            Resource::Comments => "comments",
        }
    }
}

/// A record type that is fetched as a collection from one endpoint.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> u32;
}

/// A record with one designated field that list pages search against.
pub trait Searchable {
    fn search_field(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub website: String,
    pub company: Company,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

impl Address {
    /// "street, suite, city" as shown in the users table.
    pub fn formatted(&self) -> String {
        format!("{}, {}, {}", self.street, self.suite, self.city)
    }
}

/// Coordinates are strings on the wire and are forwarded verbatim to the
/// geocoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Reverse-geocoding payload. Only the country code is consumed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    #[serde(default)]
    pub country_code: Option<String>,
}

macro_rules! record {
    ($ty:ty, $resource:expr) => {
        impl Record for $ty {
            const RESOURCE: Resource = $resource;

            fn id(&self) -> u32 {
                self.id
            }
        }
    };
}

record!(Post, Resource::Posts);
record!(User, Resource::Users);
record!(Todo, Resource::Todos);
record!(Album, Resource::Albums);
record!(Comment, Resource::Comments);

impl Searchable for Post {
    fn search_field(&self) -> &str {
        &self.title
    }
}

impl Searchable for Todo {
    fn search_field(&self) -> &str {
        &self.title
    }
}

impl Searchable for Album {
    fn search_field(&self) -> &str {
        &self.title
    }
}

impl Searchable for User {
    fn search_field(&self) -> &str {
        &self.name
    }
}
