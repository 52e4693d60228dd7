//! Blog: searchable post cards with infinite scroll.

use crate::config::Config;
use crate::query::QueryState;
use crate::scroll::InfiniteScroll;
use crate::sentinel::{SentinelId, SentinelRegistration, Viewport};
use crate::types::Post;

use super::{render_state, SearchState};

#[derive(Debug)]
pub struct BlogPage {
    search: SearchState,
    scroll: InfiniteScroll,
    sentinel: SentinelRegistration,
}

impl BlogPage {
    pub fn new(config: &Config, viewport: &Viewport) -> Self {
        Self {
            search: SearchState::new("posts", "title", config.debounce),
            scroll: config.scroll(),
            sentinel: viewport.observe(),
        }
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub fn scroll(&self) -> &InfiniteScroll {
        &self.scroll
    }

    pub fn sentinel_id(&self) -> SentinelId {
        self.sentinel.id()
    }

    pub fn visible_posts<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let filtered = self.search.filter(posts);
        self.scroll.window(&filtered).to_vec()
    }

    /// Handle queued sentinel events, one growth step each. Returns the
    /// number of steps taken.
    pub async fn pump_sentinel(&mut self) -> usize {
        self.scroll.follow(&mut self.sentinel).await
    }

    pub fn render(&self, state: &QueryState<Vec<Post>>) -> String {
        render_state(state, |posts| {
            let mut out = vec!["Latest Blogs".to_string(), self.search.render(), String::new()];
            out.extend(self.visible_posts(posts).into_iter().map(render_card));
            if self.scroll.is_loading() {
                out.push("Loading more...".to_string());
            }
            out.join("\n")
        })
    }
}

/// Like counter shown on a card. The demo API has none, so it is derived
/// from the id to stay stable between renders.
pub fn likes(post: &Post) -> u32 {
    post.id.wrapping_mul(37) % 71
}

fn render_card(post: &Post) -> String {
    format!(
        "## {}\n{}\nRead More -> /post/{}   ♥ {}\n",
        post.title,
        post.body,
        post.id,
        likes(post)
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    fn posts(n: u32) -> Vec<Post> {
        (1..=n)
            .map(|id| Post {
                id,
                user_id: (id - 1) / 10 + 1,
                title: if id % 10 == 0 { format!("qui est esse {id}") } else { format!("sunt aut facere {id}") },
                body: "quia et suscipit".to_string(),
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn sentinel_grows_window_one_step_per_entry() {
        let viewport = Viewport::new();
        let mut page = BlogPage::new(&Config::default(), &viewport);
        let data = posts(100);
        assert_eq!(page.visible_posts(&data).len(), 24);

        viewport.report(page.sentinel_id(), true);
        viewport.report(page.sentinel_id(), true);
        assert_eq!(page.pump_sentinel().await, 1);
        assert_eq!(page.visible_posts(&data).len(), 48);

        viewport.report(page.sentinel_id(), false);
        viewport.report(page.sentinel_id(), true);
        assert_eq!(page.pump_sentinel().await, 1);
        assert_eq!(page.scroll().visible(), 72);
    }

    #[tokio::test(start_paused = true)]
    async fn reentry_while_loading_does_not_add_a_step() {
        let viewport = Viewport::new();
        let mut page = BlogPage::new(&Config::default(), &viewport);
        let id = page.sentinel_id();
        viewport.report(id, true);

        let host = viewport.clone();
        let rescroll = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            host.report(id, false);
            host.report(id, true);
        });

        assert_eq!(page.pump_sentinel().await, 1);
        rescroll.await.unwrap();
        assert_eq!(page.scroll().visible(), 48);
    }

    #[tokio::test(start_paused = true)]
    async fn search_narrows_cards() {
        let viewport = Viewport::new();
        let mut page = BlogPage::new(&Config::default(), &viewport);
        let data = posts(100);
        page.search_mut().type_text("QUI EST", tokio::time::Instant::now());
        page.search_mut().settle().await;
        let ids: Vec<u32> = page.visible_posts(&data).iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).map(|n| n * 10).collect::<Vec<_>>());
    }

    #[test]
    fn render_handles_every_state() {
        let viewport = Viewport::new();
        let page = BlogPage::new(&Config::default(), &viewport);
        assert_eq!(page.render(&QueryState::Loading), "Loading...");
        assert_eq!(
            page.render(&QueryState::Failed("Error fetching data".to_string())),
            "Error: Error fetching data"
        );
        let rendered = page.render(&QueryState::Ready(Arc::new(posts(2))));
        assert!(rendered.starts_with("Latest Blogs\n[ Search posts by title... ]"));
        assert!(rendered.contains("Read More -> /post/2"));
    }

    #[test]
    fn dropping_page_unregisters_sentinel() {
        let viewport = Viewport::new();
        let page = BlogPage::new(&Config::default(), &viewport);
        let id = page.sentinel_id();
        drop(page);
        assert!(!viewport.is_observed(id));
    }
}
