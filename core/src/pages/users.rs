//! Users: paginated, sortable table with lazily resolved country flags.

use std::collections::HashMap;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::flag::{FlagCell, Geocoder};
use crate::query::QueryState;
use crate::table::{CellValue, Column, Table};
use crate::types::User;

use super::{render_state, Listing, SearchState};

pub const PAGE_SIZE: usize = 5;

#[derive(Debug)]
pub struct UsersPage {
    search: SearchState,
    listing: Listing,
    flags: HashMap<u32, FlagCell>,
    flag_cdn: String,
}

impl UsersPage {
    pub fn new(config: &Config) -> Self {
        Self {
            search: SearchState::new("users", "name", config.debounce),
            listing: Listing::new(PAGE_SIZE),
            flags: HashMap::new(),
            flag_cdn: config.flag_cdn.clone(),
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

    pub fn filtered<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        self.search.filter(users)
    }

    pub fn current_page<'a>(&mut self, users: &'a [User]) -> Vec<&'a User> {
        let filtered = self.search.filter(users);
        self.listing.page(&filtered)
    }

    pub fn next_page(&mut self, users: &[User]) {
        let filtered = self.search.filter(users);
        self.listing.next_page(&filtered);
    }

    pub fn prev_page(&mut self, users: &[User]) {
        let filtered = self.search.filter(users);
        self.listing.prev_page(&filtered);
    }

    pub fn go_to(&mut self, page: usize, users: &[User]) {
        let filtered = self.search.filter(users);
        self.listing.go_to(page, &filtered);
    }

    /// Pointer entered the flag cell of `user`.
    pub fn hover_flag(&mut self, user: &User, geocoder: &Geocoder) -> Option<JoinHandle<()>> {
        let flag_cdn = &self.flag_cdn;
        self.flags
            .entry(user.id)
            .or_insert_with(|| FlagCell::new(&user.address.geo, flag_cdn))
            .hover(geocoder)
    }

    pub fn render(&mut self, state: &QueryState<Vec<User>>) -> String {
        let QueryState::Ready(users) = state else {
            return render_state(state, |_| String::new());
        };
        let filtered = self.search.filter(users);
        let page = self.listing.page(&filtered);
        let table = Table::new(user_columns(&self.flags)).with_sort(self.listing.sort());
        [
            "Registered Users".to_string(),
            self.search.render(),
            String::new(),
            table.render(&page),
            String::new(),
            self.listing.controls(filtered.len()),
        ]
        .join("\n")
    }
}

pub fn user_columns(flags: &HashMap<u32, FlagCell>) -> Vec<Column<'_, User>> {
    vec![
        Column::new("name", "Name", |u: &User| u.name.as_str().into()),
        Column::new("username", "Username", |u: &User| u.username.as_str().into()),
        Column::new("email", "Email", |u: &User| u.email.as_str().into()),
        Column::new("phone", "Phone", |u: &User| u.phone.as_str().into()),
        Column::new("address.street", "Address", |u: &User| u.address.street.as_str().into())
            .with_render(|u: &User| u.address.formatted()),
        Column::new("address.geo", "Country Flag", |_: &User| CellValue::Empty).with_render(
            move |u: &User| match flags.get(&u.id) {
                Some(cell) => cell.render(),
                None => "🌍".to_string(),
            },
        ),
        Column::new("address.zipcode", "Zipcode", |u: &User| u.address.zipcode.as_str().into()),
        Column::new("website", "Website", |u: &User| u.website.as_str().into()),
        Column::new("company.name", "Company", |u: &User| u.company.name.as_str().into()),
        Column::new("company.catchPhrase", "Catchphrase", |u: &User| {
            u.company.catch_phrase.as_str().into()
        }),
    ]
}
