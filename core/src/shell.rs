//! Home page and the header/footer chrome around every other route.

/// A navigable dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub path: &'static str,
}

pub const SECTIONS: [Section; 4] = [
    Section { name: "Blog", path: "/blog" },
    Section { name: "Users", path: "/users" },
    Section { name: "Todos", path: "/todos" },
    Section { name: "Albums", path: "/albums" },
];

pub const TITLE: &str = "Content Explorer Dashboard";
pub const SUBTITLE: &str = "Browse various resources interactively";

const HEADER: &str = "[Home Page] -> /";
const FOOTER: &str = "Content Explorer";

pub fn render_home() -> String {
    let mut out = vec![format!("# {TITLE}"), SUBTITLE.to_string(), String::new()];
    out.extend(SECTIONS.iter().map(|s| format!("[ {} ] -> {}", s.name, s.path)));
    out.join("\n")
}

/// Wrap a page body in header and footer. An empty body still gets chrome.
pub fn render_shell(body: &str) -> String {
    let rule = "=".repeat(40);
    let mut out = format!("{HEADER}\n{rule}\n");
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out.push_str(&format!("{rule}\n{FOOTER}"));
    out
}
