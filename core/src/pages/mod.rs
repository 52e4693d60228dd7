//! Page models: one per route.
//!
//! Every page owns its ephemeral view state and renders from a
//! `QueryState` snapshot, so loading and failure are handled the same way
//! everywhere: a loader line, or `Error: {message}` confined to that page.

mod albums;
mod blog;
mod listing;
mod post;
mod todos;
mod users;

pub use albums::AlbumsPage;
pub use blog::BlogPage;
pub use listing::{Listing, SearchState};
pub use post::{CommentForm, PostDetail, PostPage};
pub use todos::{DisplayMode, TodosPage};
pub use users::UsersPage;

use crate::query::QueryState;

pub const LOADER: &str = "Loading...";

pub(crate) fn render_state<T>(state: &QueryState<T>, ready: impl FnOnce(&T) -> String) -> String {
    match state {
        QueryState::Loading => LOADER.to_string(),
        QueryState::Failed(msg) => format!("Error: {msg}"),
        QueryState::Ready(data) => ready(data),
    }
}
