//! Search and status filters applied by the list pages.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::types::{Comment, Record, Searchable, Todo};

/// Case-insensitive substring test.
pub fn matches_query(field: &str, query: &str) -> bool {
    field.to_lowercase().contains(&query.to_lowercase())
}

/// Records whose designated field contains `query`, in original order.
/// A blank query keeps everything.
pub fn filter_by_search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| matches_query(item.search_field(), query))
        .collect()
}

/// Comments belonging to `post_id`, in original relative order.
pub fn comments_for_post(comments: &[Comment], post_id: u32) -> Vec<&Comment> {
    comments.iter().filter(|c| c.post_id == post_id).collect()
}

/// Identity of a filtered set: its ordered ids. Pagination resets when this
/// changes.
pub fn fingerprint<T: Record>(items: &[&T]) -> u64 {
    let mut hasher = DefaultHasher::new();
    items.len().hash(&mut hasher);
    for item in items {
        item.id().hash(&mut hasher);
    }
    hasher.finish()
}

/// Secondary filter on the todos page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => todo.completed,
            StatusFilter::Pending => !todo.completed,
        }
    }

    pub fn apply<'a>(self, todos: Vec<&'a Todo>) -> Vec<&'a Todo> {
        if self == StatusFilter::All {
            return todos;
        }
        todos.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}
