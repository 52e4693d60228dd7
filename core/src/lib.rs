//! Headless core of the content explorer dashboard.
//!
//! # Overview
//! Browses the posts, users, todos, albums and comments of a public demo
//! JSON API. Every page is a plain state machine that renders to text, so
//! the whole dashboard runs and tests without a browser.
//!
//! # Design
//! - `ExplorerClient` keeps the host-does-IO split: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. A `Transport`
//!   performs the round trip; `UreqTransport` is the default.
//! - `Resources` wraps the client with a shared `QueryCache` that holds one
//!   entry per query key for the life of the process and never issues two
//!   requests for the same key at once.
//! - Pages own their view state (search, debounce, pagination, sort,
//!   infinite scroll) and render from a `QueryState` snapshot.
//! - `Explorer` routes a path to a page and replays a scripted interaction.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod cache;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod flag;
pub mod http;
pub mod pages;
pub mod pagination;
pub mod query;
pub mod router;
pub mod scroll;
pub mod search;
pub mod sentinel;
pub mod shell;
pub mod table;
pub mod transport;
pub mod types;

pub use app::{Explorer, SortRequest, ViewOptions};
pub use cache::{CacheLookup, QueryCache, QueryKey};
pub use client::ExplorerClient;
pub use config::Config;
pub use error::FetchError;
pub use filter::StatusFilter;
pub use flag::{FlagCell, FlagState, Geocoder};
pub use http::{HttpRequest, HttpResponse};
pub use query::{QueryState, Resources};
pub use router::Route;
pub use transport::{Transport, UreqTransport};
pub use types::{Album, Comment, Post, Record, Resource, Todo, User};
