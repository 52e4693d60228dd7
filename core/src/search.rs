//! Controlled search input with a clear button.
//!
//! The box only holds text; debouncing happens downstream in the page.

#[derive(Debug, Clone)]
pub struct SearchBox {
    text: String,
    resource: &'static str,
    field: &'static str,
}

impl SearchBox {
    pub fn new(resource: &'static str, field: &'static str) -> Self {
        Self {
            text: String::new(),
            resource,
            field,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn shows_clear_button(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn placeholder(&self) -> String {
        format!("Search {} by {}...", self.resource, self.field)
    }

    pub fn render(&self) -> String {
        if self.shows_clear_button() {
            format!("[ {} ✕ ]", self.text)
        } else {
            format!("[ {} ]", self.placeholder())
        }
    }
}
