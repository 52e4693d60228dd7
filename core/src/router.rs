//! Path routing.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blog,
    Post(u32),
    Users,
    Todos,
    Albums,
    NotFound(String),
}

impl Route {
    /// Map a path to a route. A trailing slash is ignored; a post id must be
    /// plain ASCII digits to match `/post/:id`.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/blog" => Route::Blog,
            "/users" => Route::Users,
            "/todos" => Route::Todos,
            "/albums" => Route::Albums,
            other => other
                .strip_prefix("/post/")
                .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|id| id.parse().ok())
                .map(Route::Post)
                .unwrap_or_else(|| Route::NotFound(path.to_string())),
        }
    }

    pub fn has_shell(&self) -> bool {
        !matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Blog => f.write_str("/blog"),
            Route::Post(id) => write!(f, "/post/{id}"),
            Route::Users => f.write_str("/users"),
            Route::Todos => f.write_str("/todos"),
            Route::Albums => f.write_str("/albums"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}
