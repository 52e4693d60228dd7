//! Albums: searchable, paginated table.

use crate::config::Config;
use crate::query::QueryState;
use crate::table::{Column, Table};
use crate::types::Album;

use super::{render_state, Listing, SearchState};

pub const PAGE_SIZE: usize = 20;

#[derive(Debug)]
pub struct AlbumsPage {
    search: SearchState,
    listing: Listing,
}

impl AlbumsPage {
    pub fn new(config: &Config) -> Self {
        Self {
            search: SearchState::new("albums", "title", config.debounce),
            listing: Listing::new(PAGE_SIZE),
        }
    }

    pub fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.listing.toggle_sort(key);
    }

    pub fn current_page<'a>(&mut self, albums: &'a [Album]) -> Vec<&'a Album> {
        let filtered = self.search.filter(albums);
        self.listing.page(&filtered)
    }

    pub fn next_page(&mut self, albums: &[Album]) {
        let filtered = self.search.filter(albums);
        self.listing.next_page(&filtered);
    }

    pub fn prev_page(&mut self, albums: &[Album]) {
        let filtered = self.search.filter(albums);
        self.listing.prev_page(&filtered);
    }

    pub fn go_to(&mut self, page: usize, albums: &[Album]) {
        let filtered = self.search.filter(albums);
        self.listing.go_to(page, &filtered);
    }

    pub fn render(&mut self, state: &QueryState<Vec<Album>>) -> String {
        let QueryState::Ready(albums) = state else {
            return render_state(state, |_| String::new());
        };
        let filtered = self.search.filter(albums);
        let page = self.listing.page(&filtered);
        let table = Table::new(album_columns()).with_sort(self.listing.sort());
        [
            "Released Albums".to_string(),
            self.search.render(),
            String::new(),
            table.render(&page),
            String::new(),
            self.listing.controls(filtered.len()),
        ]
        .join("\n")
    }
}

pub fn album_columns<'a>() -> Vec<Column<'a, Album>> {
    vec![
        Column::new("id", "ID", |a: &Album| a.id.into()),
        Column::new("userId", "User ID", |a: &Album| a.user_id.into()),
        Column::new("title", "Title", |a: &Album| a.title.as_str().into()),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn albums(n: u32) -> Vec<Album> {
        (1..=n)
            .map(|id| Album {
                id,
                user_id: (id - 1) / 10 + 1,
                title: format!("album {id}"),
            })
            .collect()
    }

    #[test]
    fn pages_hold_twenty_albums() {
        let mut page = AlbumsPage::new(&Config::default());
        let data = albums(45);
        assert_eq!(page.current_page(&data).len(), 20);
        page.go_to(3, &data);
        let last: Vec<u32> = page.current_page(&data).iter().map(|a| a.id).collect();
        assert_eq!(last, (41..=45).collect::<Vec<_>>());
        page.next_page(&data);
        assert_eq!(page.listing().paginator().current_page(), 3);
        page.prev_page(&data);
        assert_eq!(page.listing().paginator().current_page(), 2);
    }

    #[test]
    fn sorting_applies_within_the_page() {
        let mut page = AlbumsPage::new(&Config::default());
        page.toggle_sort("id");
        page.toggle_sort("id");
        let rendered = page.render(&QueryState::Ready(Arc::new(albums(45))));
        let first_row = rendered.lines().nth(5).unwrap_or_default();
        assert!(first_row.starts_with("20 "));
        assert!(rendered.ends_with("(Prev)   Page 1 of 3   Next >"));
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let mut page = AlbumsPage::new(&Config::default());
        let rendered = page.render(&QueryState::Ready(Arc::new(Vec::new())));
        assert!(rendered.ends_with("(Prev)   Page 1 of 1   (Next)"));
    }
}
