//! Displayed list state for a page that reloads as its filters change.
//!
//! Each load takes a [`LoadTicket`]. Only the newest ticket may apply its
//! result; anything older is dropped, not merged. A failed load keeps the
//! items already on display and records the message.

use tracing::debug;

use crate::domain::{total_pages, PagedResult};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    Stale,
}

impl<T> ListState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Marks a new load as current; earlier tickets become stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn finish(&mut self, ticket: LoadTicket, result: Result<PagedResult<T>, ApiError>) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, current = self.generation, "Dropping stale load");
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                LoadOutcome::Applied
            }
            Err(e) => {
                self.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Moves to `page`, clamped to the known range. Returns whether it changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages());
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Filter changes restart from the first page.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<&'static str>, total: u64) -> PagedResult<&'static str> {
        PagedResult { items, total, page: 1, page_size: 10, success: true, message: None }
    }

    #[test]
    fn newest_load_wins_and_stale_is_dropped() {
        let mut state = ListState::new(10);
        let first = state.begin();
        let second = state.begin();

        assert_eq!(state.finish(second, Ok(page(vec!["b"], 1))), LoadOutcome::Applied);
        assert_eq!(state.finish(first, Ok(page(vec!["a"], 1))), LoadOutcome::Stale);
        assert_eq!(state.items, vec!["b"]);
        assert!(!state.loading);
    }

    #[test]
    fn stale_failure_does_not_touch_state() {
        let mut state = ListState::new(10);
        let first = state.begin();
        let second = state.begin();
        state.finish(first, Err(ApiError::Shape));
        assert!(state.loading);
        assert_eq!(state.error, None);
        state.finish(second, Ok(page(vec![], 0)));
        assert!(!state.loading);
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut state = ListState::new(10);
        let ticket = state.begin();
        state.finish(ticket, Ok(page(vec!["a", "b"], 25)));

        let ticket = state.begin();
        let outcome = state.finish(ticket, Err(ApiError::Application("bad".into())));

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(state.items, vec!["a", "b"]);
        assert_eq!(state.total, 25);
        assert_eq!(state.error.as_deref(), Some("bad"));
    }

    #[test]
    fn paging_is_clamped() {
        let mut state: ListState<&str> = ListState::new(10);
        assert_eq!(state.total_pages(), 1);
        assert!(!state.go_to(5));

        let ticket = state.begin();
        state.finish(ticket, Ok(page(vec!["a"], 25)));
        assert_eq!(state.total_pages(), 3);
        assert!(state.go_to(5));
        assert_eq!(state.page, 3);
        assert!(!state.has_next());
        assert!(state.has_previous());

        state.reset_page();
        assert_eq!(state.page, 1);
    }
}
