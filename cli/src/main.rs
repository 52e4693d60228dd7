//! Terminal front end: render one explorer route and print it.
//!
//! Run with: explorer /users --search lea --sort name:desc

use std::io::Write;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use explorer_core::{Config, Explorer, SortRequest, StatusFilter, UreqTransport, ViewOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "explorer", about = "Browse the demo API from the terminal")]
struct Cli {
    /// Route to render: /, /blog, /post/:id, /users, /todos or /albums.
    #[arg(default_value = "/")]
    route: String,

    /// Search text, applied once typing settles.
    #[arg(long)]
    search: Option<String>,

    /// Page of a paginated table (1-based).
    #[arg(long)]
    page: Option<usize>,

    /// Times to scroll the infinite list to its end.
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Todo status filter: all, completed or pending.
    #[arg(long, default_value = "all", value_parser = parse_status)]
    status: StatusFilter,

    /// Show todos as a table instead of cards.
    #[arg(long)]
    table: bool,

    /// Sort column, optionally suffixed with :desc.
    #[arg(long, value_parser = SortRequest::parse)]
    sort: Option<SortRequest>,

    /// Resolve the country flag of every user shown.
    #[arg(long)]
    flags: bool,

    /// Comment text to submit on a post page.
    #[arg(long)]
    comment: Option<String>,

    /// Override the API base URL (default from EXPLORER_API_BASE).
    #[arg(long)]
    api_base: Option<String>,
}

fn parse_status(raw: &str) -> Result<StatusFilter, String> {
    raw.parse()
}

impl Cli {
    fn config(&self, base: Config) -> Result<Config> {
        ensure!(self.page != Some(0), "pages start at 1");
        let Some(api_base) = &self.api_base else {
            return Ok(base);
        };
        ensure!(
            api_base.starts_with("http://") || api_base.starts_with("https://"),
            "--api-base must be an http(s) URL, got {api_base:?}"
        );
        Ok(base.with_api_base(api_base.as_str()))
    }

    fn options(&self) -> ViewOptions {
        ViewOptions {
            search: self.search.clone(),
            page: self.page,
            more: self.more,
            status: self.status,
            table: self.table,
            sort: self.sort.clone(),
            hover_flags: self.flags,
            comment: self.comment.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = cli.config(Config::from_env())?;
    info!(api = %config.api_base, route = %cli.route, "rendering");

    let explorer = Explorer::new(config, Arc::new(UreqTransport::new()));
    let view = explorer.render(&cli.route, &cli.options()).await;
    writeln!(std::io::stdout().lock(), "{view}").context("writing view to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_view_options() {
        let cli = Cli::parse_from([
            "explorer", "/todos", "--search", "quis", "--status", "Completed", "--table", "--sort", "title:desc",
            "--page", "2",
        ]);
        let options = cli.options();
        assert_eq!(cli.route, "/todos");
        assert_eq!(options.search.as_deref(), Some("quis"));
        assert_eq!(options.status, StatusFilter::Completed);
        assert!(options.table);
        assert_eq!(options.page, Some(2));
        assert!(options.sort.is_some_and(|s| s.column == "title" && s.descending));
    }

    #[test]
    fn route_defaults_to_home() {
        let cli = Cli::parse_from(["explorer"]);
        assert_eq!(cli.route, "/");
        assert_eq!(cli.options().more, 0);
    }

    #[test]
    fn api_base_override_is_validated() {
        let cli = Cli::parse_from(["explorer", "--api-base", "http://127.0.0.1:3000"]);
        assert_eq!(cli.config(Config::default()).unwrap().api_base, "http://127.0.0.1:3000");

        let cli = Cli::parse_from(["explorer", "--api-base", "localhost:3000"]);
        assert!(cli.config(Config::default()).is_err());

        let cli = Cli::parse_from(["explorer", "/albums", "--page", "0"]);
        assert!(cli.config(Config::default()).is_err());
    }

    #[test]
    fn bad_status_is_rejected() {
        assert!(Cli::try_parse_from(["explorer", "/todos", "--status", "done"]).is_err());
    }
}
