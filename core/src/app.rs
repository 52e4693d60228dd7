//! One-shot rendering of a route.
//!
//! `Explorer` owns the shared services (request cache, geocoder, viewport)
//! and replays a scripted interaction against a freshly opened page: type a
//! search, pick a status, sort, page, scroll. The cache outlives individual
//! renders, so rendering two routes that read the same collection costs one
//! request.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::QueryCache;
use crate::client::ExplorerClient;
use crate::config::Config;
use crate::filter::StatusFilter;
use crate::flag::Geocoder;
use crate::pages::{AlbumsPage, BlogPage, DisplayMode, PostPage, SearchState, TodosPage, UsersPage};
use crate::query::{QueryState, Resources};
use crate::router::Route;
use crate::sentinel::{SentinelId, Viewport};
use crate::shell::{render_home, render_shell};
use crate::transport::Transport;
use crate::types::{Album, Post, Todo, User};

/// Column sort request; `descending` toggles the column twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub column: String,
    pub descending: bool,
}

impl SortRequest {
    /// Parse `COLUMN` or `COLUMN:desc` / `COLUMN:asc`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (column, direction) = match raw.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (raw, None),
        };
        if column.is_empty() {
            return Err(format!("missing sort column in {raw:?}"));
        }
        let descending = match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => return Err(format!("unknown sort direction: {other}")),
        };
        Ok(Self {
            column: column.to_string(),
            descending,
        })
    }

    fn toggles(&self) -> usize {
        if self.descending {
            2
        } else {
            1
        }
    }
}

/// Interaction replayed before rendering.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub search: Option<String>,
    pub page: Option<usize>,
    /// Times the infinite-scroll sentinel comes into view.
    pub more: usize,
    pub status: StatusFilter,
    pub table: bool,
    pub sort: Option<SortRequest>,
    /// Resolve country flags for every user on the shown page.
    pub hover_flags: bool,
    pub comment: Option<String>,
}

#[derive(Debug)]
pub struct Explorer {
    config: Config,
    resources: Resources,
    geocoder: Geocoder,
    viewport: Viewport,
}

impl Explorer {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let resources = Resources::new(
            ExplorerClient::new(&config.api_base),
            transport.clone(),
            QueryCache::new(),
        );
        let geocoder = Geocoder::new(&config.geocode_base, transport);
        Self {
            config,
            resources,
            geocoder,
            viewport: Viewport::new(),
        }
    }

    /// Render `path` after replaying `options`.
    pub async fn render(&self, path: &str, options: &ViewOptions) -> String {
        let route = Route::parse(path);
        debug!(%route, "rendering");
        let body = match &route {
            Route::Home => render_home(),
            Route::Blog => self.blog(options).await,
            Route::Post(id) => self.post(*id, options).await,
            Route::Users => self.users(options).await,
            Route::Todos => self.todos(options).await,
            Route::Albums => self.albums(options).await,
            Route::NotFound(_) => String::new(),
        };
        if route.has_shell() {
            render_shell(&body)
        } else {
            body
        }
    }

    async fn blog(&self, options: &ViewOptions) -> String {
        let mut page = BlogPage::new(&self.config, &self.viewport);
        search(page.search_mut(), options).await;
        let state = self.resources.load::<Post>().await;
        for _ in 0..options.more {
            self.reveal(page.sentinel_id());
            page.pump_sentinel().await;
        }
        page.render(&state)
    }

    async fn post(&self, id: u32, options: &ViewOptions) -> String {
        let mut page = PostPage::open(id, &self.resources);
        page.loaded().await;
        let mut out = page.render();
        if let Some(text) = &options.comment {
            page.form_mut().set_text(text.as_str());
            out.push_str(&format!("\n\n{}", page.form().submit()));
        }
        out
    }

    async fn users(&self, options: &ViewOptions) -> String {
        let mut page = UsersPage::new(&self.config);
        search(page.search_mut(), options).await;
        let state = self.resources.load::<User>().await;
        if let QueryState::Ready(users) = &state {
            sort(options, |key| page.toggle_sort(key));
            if let Some(n) = options.page {
                page.go_to(n, users);
            }
            if options.hover_flags {
                let shown: Vec<User> = page.current_page(users).into_iter().cloned().collect();
                let lookups: Vec<_> = shown
                    .iter()
                    .filter_map(|user| page.hover_flag(user, &self.geocoder))
                    .collect();
                for lookup in lookups {
                    if let Err(err) = lookup.await {
                        warn!(error = %err, "flag lookup task failed");
                    }
                }
            }
        }
        page.render(&state)
    }

    async fn todos(&self, options: &ViewOptions) -> String {
        let mut page = TodosPage::new(&self.config, &self.viewport);
        search(page.search_mut(), options).await;
        page.set_status(options.status);
        if options.table {
            page.set_mode(DisplayMode::Table);
        }
        let state = self.resources.load::<Todo>().await;
        if let QueryState::Ready(todos) = &state {
            sort(options, |key| page.toggle_sort(key));
            if let Some(n) = options.page {
                page.go_to(n, todos);
            }
        }
        if let Some(id) = page.sentinel_id() {
            for _ in 0..options.more {
                self.reveal(id);
                page.pump_sentinel().await;
            }
        }
        page.render(&state)
    }

    async fn albums(&self, options: &ViewOptions) -> String {
        let mut page = AlbumsPage::new(&self.config);
        search(page.search_mut(), options).await;
        let state = self.resources.load::<Album>().await;
        if let QueryState::Ready(albums) = &state {
            sort(options, |key| page.toggle_sort(key));
            if let Some(n) = options.page {
                page.go_to(n, albums);
            }
        }
        page.render(&state)
    }

    /// Scroll the sentinel into view and back out.
    fn reveal(&self, id: SentinelId) {
        self.viewport.report(id, true);
        self.viewport.report(id, false);
    }
}

async fn search(state: &mut SearchState, options: &ViewOptions) {
    if let Some(text) = &options.search {
        state.type_text(text, Instant::now());
        state.settle().await;
    }
}

fn sort(options: &ViewOptions, mut toggle: impl FnMut(&str)) {
    if let Some(request) = &options.sort {
        for _ in 0..request.toggles() {
            toggle(&request.column);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::FetchError;
    use crate::http::{HttpRequest, HttpResponse};

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for FakeApi {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = if request.url.ends_with("/albums") {
                let albums: Vec<String> = (1..=45)
                    .map(|id| format!(r#"{{"userId":{},"id":{id},"title":"album {id}"}}"#, id % 3 + 1))
                    .collect();
                format!("[{}]", albums.join(","))
            } else if request.url.ends_with("/todos") {
                r#"[{"userId":1,"id":1,"title":"delectus aut autem","completed":false},
                    {"userId":1,"id":2,"title":"quis ut nam","completed":true}]"#
                    .to_string()
            } else {
                return Ok(HttpResponse {
                    status: 500,
                    headers: Vec::new(),
                    body: String::new(),
                });
            };
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body,
            })
        }
    }

    fn explorer(api: Arc<FakeApi>) -> Explorer {
        let config = Config {
            debounce: Duration::from_millis(5),
            scroll_delay: Duration::from_millis(5),
            ..Config::default()
        };
        Explorer::new(config.with_api_base("http://api.test"), api)
    }

    #[test]
    fn sort_request_parses_direction() {
        assert_eq!(
            SortRequest::parse("title:desc"),
            Ok(SortRequest { column: "title".into(), descending: true })
        );
        assert_eq!(SortRequest::parse("id").map(|s| s.descending), Ok(false));
        assert!(SortRequest::parse("id:sideways").is_err());
        assert!(SortRequest::parse(":desc").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn home_has_no_chrome() {
        let api = Arc::new(FakeApi::default());
        let out = explorer(api.clone()).render("/", &ViewOptions::default()).await;
        assert!(out.starts_with("# Content Explorer Dashboard"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_route_renders_only_chrome() {
        let api = Arc::new(FakeApi::default());
        let out = explorer(api).render("/nowhere", &ViewOptions::default()).await;
        assert!(out.contains("Home Page"));
        assert_eq!(out.lines().count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn albums_page_and_sort_are_applied() {
        let api = Arc::new(FakeApi::default());
        let options = ViewOptions {
            page: Some(3),
            sort: Some(SortRequest { column: "id".into(), descending: true }),
            ..ViewOptions::default()
        };
        let out = explorer(api).render("/albums", &options).await;
        assert!(out.contains("Page 3 of 3"));
        assert!(out.contains("ID ⬇️"));
        let first_row = out.lines().find(|l| l.starts_with("45") || l.starts_with("41")).unwrap();
        assert!(first_row.starts_with("45"));
    }

    #[tokio::test(start_paused = true)]
    async fn collection_is_fetched_once_across_renders() {
        let api = Arc::new(FakeApi::default());
        let explorer = explorer(api.clone());
        explorer.render("/todos", &ViewOptions::default()).await;
        let options = ViewOptions {
            table: true,
            status: StatusFilter::Completed,
            ..ViewOptions::default()
        };
        let out = explorer.render("/todos", &options).await;
        assert!(out.contains("~~quis ut nam~~"));
        assert!(!out.contains("delectus"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_collection_renders_error_inside_chrome() {
        let api = Arc::new(FakeApi::default());
        let out = explorer(api).render("/users", &ViewOptions::default()).await;
        assert!(out.contains("Error: Error fetching data"));
        assert!(out.contains("Home Page"));
    }

    #[tokio::test(start_paused = true)]
    async fn search_is_applied_after_debounce() {
        let api = Arc::new(FakeApi::default());
        let options = ViewOptions {
            search: Some("QUIS".into()),
            ..ViewOptions::default()
        };
        let out = explorer(api).render("/todos", &options).await;
        assert!(out.contains("quis ut nam"));
        assert!(!out.contains("delectus aut autem"));
    }
}
