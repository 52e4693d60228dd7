//! Todos: search plus status filter, shown as cards (infinite scroll) or as
//! a paginated table. Switching display keeps every filter.

use crate::config::Config;
use crate::filter::StatusFilter;
use crate::query::QueryState;
use crate::scroll::InfiniteScroll;
use crate::sentinel::{SentinelId, SentinelRegistration, Viewport};
use crate::table::{Column, Table};
use crate::types::Todo;

use super::{render_state, Listing, SearchState};

pub const PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Card,
    Table,
}

#[derive(Debug)]
pub struct TodosPage {
    search: SearchState,
    status: StatusFilter,
    mode: DisplayMode,
    listing: Listing,
    scroll: InfiniteScroll,
    viewport: Viewport,
    sentinel: Option<SentinelRegistration>,
}

impl TodosPage {
    pub fn new(config: &Config, viewport: &Viewport) -> Self {
        Self {
            search: SearchState::new("todos", "title", config.debounce),
            status: StatusFilter::All,
            mode: DisplayMode::Card,
            listing: Listing::new(PAGE_SIZE),
            scroll: config.scroll(),
            viewport: viewport.clone(),
            sentinel: Some(viewport.observe()),
        }
    }

    pub fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The sentinel only exists while cards are shown.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.sentinel = match mode {
            DisplayMode::Card => Some(self.viewport.observe()),
            DisplayMode::Table => None,
        };
    }

    pub fn sentinel_id(&self) -> Option<SentinelId> {
        self.sentinel.as_ref().map(SentinelRegistration::id)
    }

    pub fn scroll(&self) -> &InfiniteScroll {
        &self.scroll
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.listing.toggle_sort(key);
    }

    pub fn filtered<'a>(&self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        self.status.apply(self.search.filter(todos))
    }

    pub fn visible_cards<'a>(&self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        self.scroll.window(&self.filtered(todos)).to_vec()
    }

    pub fn table_page<'a>(&mut self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        let filtered = self.filtered(todos);
        self.listing.page(&filtered)
    }

    pub fn next_page(&mut self, todos: &[Todo]) {
        let filtered = self.filtered(todos);
        self.listing.next_page(&filtered);
    }

    pub fn prev_page(&mut self, todos: &[Todo]) {
        let filtered = self.filtered(todos);
        self.listing.prev_page(&filtered);
    }

    pub fn go_to(&mut self, page: usize, todos: &[Todo]) {
        let filtered = self.filtered(todos);
        self.listing.go_to(page, &filtered);
    }

    /// No-op in table mode, where there is no sentinel.
    pub async fn pump_sentinel(&mut self) -> usize {
        match self.sentinel.as_mut() {
            Some(sentinel) => self.scroll.follow(sentinel).await,
            None => 0,
        }
    }

    pub fn render(&mut self, state: &QueryState<Vec<Todo>>) -> String {
        let QueryState::Ready(todos) = state else {
            return render_state(state, |_| String::new());
        };
        let mut out = vec![
            "List of Todos".to_string(),
            format!("[Cards{}] [Table{}]", marker(self.mode == DisplayMode::Card), marker(self.mode == DisplayMode::Table)),
            format!("{}   Status: {}", self.search.render(), self.status),
            String::new(),
        ];
        match self.mode {
            DisplayMode::Table => {
                let filtered = self.filtered(todos);
                let page = self.listing.page(&filtered);
                let table = Table::new(todo_columns()).with_sort(self.listing.sort());
                out.push(table.render(&page));
                out.push(String::new());
                out.push(self.listing.controls(filtered.len()));
            }
            DisplayMode::Card => {
                out.extend(self.visible_cards(todos).into_iter().map(render_card));
                if self.scroll.is_loading() {
                    out.push("Loading more...".to_string());
                }
            }
        }
        out.join("\n")
    }
}

fn marker(active: bool) -> &'static str {
    if active {
        " *"
    } else {
        ""
    }
}

fn status_label(todo: &Todo) -> &'static str {
    if todo.completed {
        "Completed"
    } else {
        "Pending"
    }
}

fn render_card(todo: &Todo) -> String {
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    format!("{mark} {}\n    {}", todo.title, status_label(todo))
}

pub fn todo_columns<'a>() -> Vec<Column<'a, Todo>> {
    vec![
        Column::new("id", "ID", |t: &Todo| t.id.into()),
        Column::new("title", "Title", |t: &Todo| t.title.as_str().into()).with_render(|t: &Todo| {
            if t.completed {
                format!("~~{}~~", t.title)
            } else {
                t.title.clone()
            }
        }),
        Column::new("completed", "Completed", |t: &Todo| t.completed.into())
            .with_render(|t: &Todo| status_label(t).to_string()),
    ]
}
