//! Fixed-size page windows over a filtered list.

/// Page cursor for one list. Pages are 1-based.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    current: usize,
    fingerprint: Option<u64>,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
            fingerprint: None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// `max(1, ceil(len / page_size))`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Reset to page 1 when the filtered set's identity differs from the
    /// last one seen. Returns true if a reset happened.
    pub fn sync(&mut self, fingerprint: u64) -> bool {
        let changed = self.fingerprint != Some(fingerprint);
        if changed {
            self.fingerprint = Some(fingerprint);
            self.current = 1;
        }
        changed
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        len > 0 && self.current < self.total_pages(len)
    }

    pub fn next(&mut self, len: usize) {
        self.current = (self.current + 1).min(self.total_pages(len));
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current = page.clamp(1, self.total_pages(len));
    }

    /// Items on the current page. Clamps the cursor first so a shrunken list
    /// never yields an out-of-range page.
    pub fn slice<'a, T>(&mut self, items: &'a [T]) -> &'a [T] {
        self.current = self.current.clamp(1, self.total_pages(items.len()));
        let start = ((self.current - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn label(&self, len: usize) -> String {
        format!("Page {} of {}", self.current, self.total_pages(len))
    }

    /// Prev / label / Next row; disabled buttons are bracketed.
    pub fn render_controls(&self, len: usize) -> String {
        let prev = if self.has_prev() { "< Prev" } else { "(Prev)" };
        let next = if self.has_next(len) { "Next >" } else { "(Next)" };
        format!("{prev}   {}   {next}", self.label(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_at_least_one() {
        let pager = Paginator::new(5);
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(5), 1);
        assert_eq!(pager.total_pages(6), 2);
        assert_eq!(pager.total_pages(10), 2);
        assert_eq!(pager.total_pages(11), 3);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut pager = Paginator::new(20);
        pager.prev();
        assert_eq!(pager.current_page(), 1);
        pager.next(100);
        pager.next(100);
        assert_eq!(pager.current_page(), 3);
        pager.go_to(99, 100);
        assert_eq!(pager.current_page(), 5);
        pager.next(100);
        assert_eq!(pager.current_page(), 5);
        assert!(!pager.has_next(100));
        pager.go_to(0, 100);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn slice_returns_page_window() {
        let items: Vec<u32> = (1..=12).collect();
        let mut pager = Paginator::new(5);
        assert_eq!(pager.slice(&items), &[1, 2, 3, 4, 5]);
        pager.next(items.len());
        pager.next(items.len());
        assert_eq!(pager.slice(&items), &[11, 12]);
    }

    #[test]
    fn slice_clamps_after_list_shrinks() {
        let items: Vec<u32> = (1..=30).collect();
        let mut pager = Paginator::new(5);
        pager.go_to(6, items.len());
        assert_eq!(pager.slice(&items[..7]), &[6, 7]);
        assert_eq!(pager.current_page(), 2);
        let empty: [u32; 0] = [];
        assert!(pager.slice(&empty).is_empty());
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn content_change_resets_to_first_page() {
        let mut pager = Paginator::new(5);
        assert!(pager.sync(1));
        pager.go_to(3, 50);
        assert!(!pager.sync(1));
        assert_eq!(pager.current_page(), 3);
        assert!(pager.sync(2));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn controls_disable_at_the_ends() {
        let mut pager = Paginator::new(5);
        assert_eq!(pager.render_controls(12), "(Prev)   Page 1 of 3   Next >");
        pager.go_to(3, 12);
        assert_eq!(pager.render_controls(12), "< Prev   Page 3 of 3   (Next)");
        assert_eq!(Paginator::new(5).render_controls(0), "(Prev)   Page 1 of 1   (Next)");
    }
}
