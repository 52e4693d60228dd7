//! Search, pagination and sort state shared by the paginated list pages.

use std::time::Duration;

use tokio::time::Instant;

use crate::debounce::Debounced;
use crate::filter::{filter_by_search, fingerprint};
use crate::pagination::Paginator;
use crate::search::SearchBox;
use crate::table::SortState;
use crate::types::{Record, Searchable};

/// A search box plus the debounced copy of its text that filtering uses.
#[derive(Debug, Clone)]
pub struct SearchState {
    input: SearchBox,
    debounced: Debounced<String>,
}

impl SearchState {
    pub fn new(resource: &'static str, field: &'static str, delay: Duration) -> Self {
        Self {
            input: SearchBox::new(resource, field),
            debounced: Debounced::new(String::new(), delay),
        }
    }

    pub fn input(&self) -> &SearchBox {
        &self.input
    }

    pub fn type_text(&mut self, text: &str, now: Instant) {
        self.input.set(text);
        self.debounced.set(text.to_string(), now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.input.clear();
        self.debounced.set(String::new(), now);
    }

    /// Debounced query as of `now`.
    pub fn poll(&mut self, now: Instant) -> &str {
        self.debounced.poll(now)
    }

    /// Wait until typing has paused and return the settled query.
    pub async fn settle(&mut self) -> &str {
        self.debounced.settled().await
    }

    /// Query currently applied to the list.
    pub fn query(&self) -> &str {
        self.debounced.value()
    }

    pub fn filter<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        filter_by_search(items, self.query())
    }

    pub fn render(&self) -> String {
        self.input.render()
    }
}

/// Page cursor and sort state for one paginated table.
#[derive(Debug, Clone)]
pub struct Listing {
    paginator: Paginator,
    sort: SortState,
}

impl Listing {
    pub fn new(page_size: usize) -> Self {
        Self {
            paginator: Paginator::new(page_size),
            sort: SortState::default(),
        }
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    /// Current page of `filtered`, resetting to page 1 if the filtered set
    /// changed since the last call.
    pub fn page<'a, T: Record>(&mut self, filtered: &[&'a T]) -> Vec<&'a T> {
        self.paginator.sync(fingerprint(filtered));
        self.paginator.slice(filtered).to_vec()
    }

    pub fn next_page<T: Record>(&mut self, filtered: &[&T]) {
        self.paginator.sync(fingerprint(filtered));
        self.paginator.next(filtered.len());
    }

    pub fn prev_page<T: Record>(&mut self, filtered: &[&T]) {
        self.paginator.sync(fingerprint(filtered));
        self.paginator.prev();
    }

    pub fn go_to<T: Record>(&mut self, page: usize, filtered: &[&T]) {
        self.paginator.sync(fingerprint(filtered));
        self.paginator.go_to(page, filtered.len());
    }

    pub fn controls(&self, len: usize) -> String {
        self.paginator.render_controls(len)
    }
}
