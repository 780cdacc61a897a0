//! Scroll-driven decisions: navbar hiding and scroll-spy.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Hides the navbar while the user scrolls down past a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarScroll {
    last: f64,
    threshold: f64,
}

impl NavbarScroll {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { last: 0.0, threshold }
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last
    }

    /// Record a scroll position; returns whether the navbar should be hidden.
    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        let hide = scroll_top > self.last && scroll_top > self.threshold;
        // Overscroll bounce reports negative offsets.
        self.last = scroll_top.max(0.0);
        hide
    }
}

/// The section the page is scrolled to: the last one (document order) whose
/// top, less `offset`, is at or above `scroll_y`.
///
/// `sections` yields `(id, offset_top)`; a current section without an id
/// yields `None`.
pub fn active_section<'a, I>(sections: I, scroll_y: f64, offset: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (Option<&'a str>, f64)>,
{
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - offset {
            current = Some(id);
        }
    }
    current.flatten()
}
