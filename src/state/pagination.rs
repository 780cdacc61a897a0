//! Page slicing for the project grid.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use std::ops::Range;

/// What a page button asks for (`data-page`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// A 1-based page number.
    Number(usize),
    Next,
}

impl PageRequest {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("next") {
            return Some(Self::Next);
        }
        raw.parse().ok().filter(|n| *n > 0).map(Self::Number)
    }
}

/// Current page over a list of `count` items, `per_page` at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    current: usize,
}

impl Paginator {
    /// A paginator on page 1. `per_page` is clamped to at least one.
    #[must_use]
    pub fn new(per_page: usize) -> Self {
        Self { per_page: per_page.max(1), current: 1 }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page)
    }

    /// Item positions on the current page.
    pub fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(count);
        let end = (start + self.per_page).min(count);
        start..end
    }

    pub fn is_on_page(&self, position: usize, count: usize) -> bool {
        self.range(count).contains(&position)
    }

    /// Go to `page`. Pages outside `1..=total` (page 1 always exists) are refused.
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        if page == 0 || page > self.total_pages(count).max(1) {
            return false;
        }
        self.current = page;
        true
    }

    /// Advance one page, stopping at the last.
    pub fn next(&mut self, count: usize) -> bool {
        self.go_to(self.current + 1, count)
    }

    pub fn apply(&mut self, request: PageRequest, count: usize) -> bool {
        match request {
            PageRequest::Number(page) => self.go_to(page, count),
            PageRequest::Next => self.next(count),
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}
