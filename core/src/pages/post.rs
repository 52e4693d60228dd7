//! Post detail: the post, its author and its comments.
//!
//! # Design
//! The author and the comment collection are only requested once the post
//! has resolved; those two requests then run concurrently. Loading runs on
//! a spawned task that holds a weak reference to the page's state, so a
//! page closed mid-load ignores the late result.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::filter::comments_for_post;
use crate::query::Resources;
use crate::types::{Comment, Post, User};

use super::LOADER;

pub const FETCH_ERROR: &str = "There was an error fetching post!";
pub const SUBMIT_NOTICE: &str = "Work in progress!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostDetail {
    Loading,
    Failed,
    NotFound,
    Ready {
        post: Arc<Post>,
        author: Arc<User>,
        comments: Vec<Comment>,
    },
}

impl PostDetail {
    /// Resolve the post, then its author and comments.
    pub async fn load(resources: &Resources, id: u32) -> PostDetail {
        let post = match resources.post(id).await {
            Ok(post) => post,
            Err(err) if err.is_not_found() => return PostDetail::NotFound,
            Err(err) => {
                warn!(id, error = %err, "post fetch failed");
                return PostDetail::Failed;
            }
        };

        let (author, comments) = tokio::join!(resources.user(post.user_id), resources.comments());
        match (author, comments) {
            (Ok(author), Ok(comments)) => PostDetail::Ready {
                comments: comments_for_post(&comments, id).into_iter().cloned().collect(),
                post,
                author,
            },
            (author, comments) => {
                if let Err(err) = author.as_ref().map(|_| ()).and(comments.as_ref().map(|_| ())) {
                    warn!(id, error = %err, "post dependencies failed");
                }
                PostDetail::Failed
            }
        }
    }
}

/// Comment box that is shown but never persists anything.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    text: String,
}

impl CommentForm {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn submit(&self) -> &'static str {
        SUBMIT_NOTICE
    }
}

#[derive(Debug)]
pub struct PostPage {
    id: u32,
    detail: Arc<Mutex<PostDetail>>,
    task: Option<JoinHandle<()>>,
    form: CommentForm,
}

impl PostPage {
    /// Open the page and start loading in the background.
    pub fn open(id: u32, resources: &Resources) -> Self {
        let detail = Arc::new(Mutex::new(PostDetail::Loading));
        let target: Weak<Mutex<PostDetail>> = Arc::downgrade(&detail);
        let resources = resources.clone();
        let task = tokio::spawn(async move {
            let loaded = PostDetail::load(&resources, id).await;
            match target.upgrade() {
                Some(detail) => *lock(&detail) = loaded,
                None => debug!(id, "post page closed before load finished"),
            }
        });
        Self {
            id,
            detail,
            task: Some(task),
            form: CommentForm::default(),
        }
    }

    /// Wait for the background load to finish.
    pub async fn loaded(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(id = self.id, error = %err, "post load task failed");
                *lock(&self.detail) = PostDetail::Failed;
            }
        }
    }

    pub fn detail(&self) -> PostDetail {
        lock(&self.detail).clone()
    }

    pub fn form(&self) -> &CommentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CommentForm {
        &mut self.form
    }

    pub fn render(&self) -> String {
        match self.detail() {
            PostDetail::Loading => LOADER.to_string(),
            PostDetail::Failed => format!("Error: {FETCH_ERROR}"),
            PostDetail::NotFound => "Post not found.".to_string(),
            PostDetail::Ready {
                post,
                author,
                comments,
            } => {
                let mut out = vec![
                    format!("# {}", post.title),
                    format!("by {}", author.name),
                    format!("Website: {}", author.website),
                    String::new(),
                    post.body.clone(),
                    String::new(),
                    "Comments".to_string(),
                    format!("[ {} ]", if self.form.text().is_empty() { "Add a comment..." } else { self.form.text() }),
                    "[Submit Comment]".to_string(),
                    String::new(),
                ];
                if comments.is_empty() {
                    out.push("No comments yet.".to_string());
                } else {
                    out.extend(
                        comments
                            .iter()
                            .map(|c| format!("- {}\n  {}\n  {}", c.email, c.name, c.body)),
                    );
                }
                out.join("\n")
            }
        }
    }
}

fn lock(detail: &Mutex<PostDetail>) -> MutexGuard<'_, PostDetail> {
    detail.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::cache::QueryCache;
    use crate::client::ExplorerClient;
    use crate::error::FetchError;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::transport::Transport;

    const USER: &str = r#"{"id":1,"name":"Leanne Graham","username":"Bret","email":"Sincere@april.biz",
        "phone":"1","address":{"street":"s","suite":"su","city":"c","zipcode":"z","geo":{"lat":"1","lng":"2"}},
        "website":"hildegard.org","company":{"name":"n","catchPhrase":"cp","bs":"bs"}}"#;

    #[derive(Default)]
    struct FakeApi {
        requests: Mutex<Vec<String>>,
        comment_calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for FakeApi {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.requests.lock().unwrap().push(request.url.clone());
            tokio::time::sleep(Duration::from_millis(10)).await;
            let path = request.url.trim_start_matches("http://api.test");
            let (status, body) = match path {
                "/posts/3" => (200, r#"{"id":3,"userId":1,"title":"ea molestias","body":"et iusto"}"#.to_string()),
                "/users/1" => (200, USER.to_string()),
                "/comments" => {
                    self.comment_calls.fetch_add(1, Ordering::SeqCst);
                    (
                        200,
                        r#"[{"postId":1,"id":1,"name":"a","email":"a@x","body":"1"},
                            {"postId":3,"id":2,"name":"b","email":"b@x","body":"2"},
                            {"postId":3,"id":3,"name":"c","email":"c@x","body":"3"},
                            {"postId":5,"id":4,"name":"d","email":"d@x","body":"4"}]"#
                            .to_string(),
                    )
                }
                "/posts/4" => (200, r#"{"id":4,"userId":9,"title":"t","body":"b"}"#.to_string()),
                _ => (404, "{}".to_string()),
            };
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }

    fn setup() -> (Arc<FakeApi>, Resources) {
        let api = Arc::new(FakeApi::default());
        let resources = Resources::new(ExplorerClient::new("http://api.test"), api.clone(), QueryCache::new());
        (api, resources)
    }

    #[tokio::test(start_paused = true)]
    async fn loads_post_then_author_and_comments() {
        let (api, resources) = setup();
        let mut page = PostPage::open(3, &resources);
        assert_eq!(page.render(), "Loading...");
        page.loaded().await;

        let PostDetail::Ready { post, author, comments } = page.detail() else {
            panic!("expected ready detail");
        };
        assert_eq!(post.title, "ea molestias");
        assert_eq!(author.name, "Leanne Graham");
        assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);

        let requests = api.requests.lock().unwrap().clone();
        assert_eq!(requests[0], "http://api.test/posts/3");
        assert_eq!(requests.len(), 3);
        assert_eq!(api.comment_calls.load(Ordering::SeqCst), 1);

        let rendered = page.render();
        assert!(rendered.starts_with("# ea molestias\nby Leanne Graham"));
        assert!(rendered.contains("- b@x\n  b\n  2"));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_post_is_not_found_and_skips_dependents() {
        let (api, resources) = setup();
        let mut page = PostPage::open(999, &resources);
        page.loaded().await;
        assert_eq!(page.detail(), PostDetail::NotFound);
        assert_eq!(page.render(), "Post not found.");
        assert_eq!(api.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_author_is_an_error() {
        let (_, resources) = setup();
        let detail = PostDetail::load(&resources, 4).await;
        assert_eq!(detail, PostDetail::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_page_is_not_written() {
        let (api, resources) = setup();
        let mut page = PostPage::open(3, &resources);
        let detail = Arc::downgrade(&page.detail);
        let task = page.task.take().unwrap();
        drop(page);
        assert!(detail.upgrade().is_none());

        task.await.unwrap();
        assert!(detail.upgrade().is_none());
        assert_eq!(api.requests.lock().unwrap().len(), 3);
        assert!(resources.state::<Comment>().data().is_some());
    }

    #[test]
    fn comment_form_only_notifies() {
        let mut form = CommentForm::default();
        form.set_text("Nice post");
        assert_eq!(form.submit(), "Work in progress!");
        assert_eq!(form.text(), "Nice post");
    }
}
