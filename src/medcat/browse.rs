//! # List/Search Controller
//!
//! State container for the catalog listing: paginated browsing with a
//! search mode that takes over as soon as the (trimmed) search string is
//! non-empty. The controller owns no I/O: callers ask it which fetch to
//! issue next via [`BrowseState::plan`], run it, and feed the outcome back
//! through [`BrowseState::apply_page`] / [`BrowseState::apply_error`].
//!
//! "More pages exist" is a heuristic, not server-declared: a page is
//! assumed to be the last one unless it came back completely full.
//!
//! The [`Debouncer`] is the single scheduling primitive: one cancellable
//! timer, re-armed on every keystroke, polled against a caller-supplied
//! clock so tests never sleep.

use crate::model::MedicineSummary;
use std::time::{Duration, Instant};

/// Delay between the last keystroke and the request it settles into.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The request the controller wants issued next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    /// Paginated listing: `GET /medicines?page=&pageSize=`
    Page { page: usize, page_size: usize },
    /// Lookup by name: `PATCH /medicines/search`
    Search { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    Paginated,
    Search,
}

#[derive(Debug)]
pub struct BrowseState {
    page: usize,
    page_size: usize,
    search: String,
    has_more: bool,
    medicines: Vec<MedicineSummary>,
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
            has_more: true,
            medicines: Vec::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn medicines(&self) -> &[MedicineSummary] {
        &self.medicines
    }

    /// Search mode iff the trimmed search string is non-empty.
    pub fn mode(&self) -> BrowseMode {
        if self.search.trim().is_empty() {
            BrowseMode::Paginated
        } else {
            BrowseMode::Search
        }
    }

    /// The fetch corresponding to the current state. Every page change or
    /// settled keystroke re-fetches; nothing is cached.
    pub fn plan(&self) -> Fetch {
        match self.mode() {
            BrowseMode::Search => Fetch::Search {
                name: self.search.clone(),
            },
            BrowseMode::Paginated => Fetch::Page {
                page: self.page,
                page_size: self.page_size,
            },
        }
    }

    /// Replace the search string. Resets to page 1 and disables forward
    /// navigation until the next page result lands.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
        self.has_more = false;
    }

    pub fn push_char(&mut self, c: char) {
        self.search.push(c);
        self.page = 1;
        self.has_more = false;
    }

    pub fn pop_char(&mut self) {
        self.search.pop();
        self.page = 1;
        self.has_more = false;
    }

    /// Record a successful fetch result. In paginated mode a completely
    /// full page is the only evidence that more pages may exist.
    pub fn apply_page(&mut self, medicines: Vec<MedicineSummary>) {
        self.has_more = match self.mode() {
            BrowseMode::Search => false,
            BrowseMode::Paginated => medicines.len() == self.page_size,
        };
        self.medicines = medicines;
    }

    /// Record a failed fetch: clear the visible list, disable forward
    /// navigation. No automatic retry.
    pub fn apply_error(&mut self) {
        self.medicines.clear();
        self.has_more = false;
    }

    pub fn can_next(&self) -> bool {
        self.mode() == BrowseMode::Paginated && self.has_more && !self.medicines.is_empty()
    }

    pub fn can_prev(&self) -> bool {
        self.mode() == BrowseMode::Paginated && self.page > 1
    }

    /// Advance one page. Returns whether the page actually changed, in
    /// which case the caller should issue `plan()` again.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// A single cancellable timer. Each `schedule` supersedes any pending
/// deadline, so a burst of keystrokes settles into at most one fire.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)arm the timer relative to `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending deadline, if any. Useful as a poll
    /// timeout for whoever drives the loop.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns true exactly once per armed deadline, when `now` has
    /// reached it. Firing disarms the timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(id: &str) -> MedicineSummary {
        MedicineSummary {
            id: id.to_string(),
            commercial_name: format!("Medicine {}", id),
            registry_code: format!("1.{}", id),
            categories: Vec::new(),
        }
    }

    fn meds(n: usize) -> Vec<MedicineSummary> {
        (0..n).map(|i| med(&i.to_string())).collect()
    }

    #[test]
    fn full_page_means_more_pages() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(10));
        assert!(state.can_next());
    }

    #[test]
    fn short_page_disables_forward_navigation() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(4));
        assert!(!state.can_next());
    }

    #[test]
    fn empty_page_disables_forward_navigation() {
        let mut state = BrowseState::new(10);
        state.apply_page(Vec::new());
        assert!(!state.can_next());
    }

    #[test]
    fn backward_navigation_disabled_at_page_one() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(10));
        assert!(!state.can_prev());
        assert!(state.next_page());
        assert!(state.can_prev());
    }

    #[test]
    fn search_mode_iff_trimmed_nonempty() {
        let mut state = BrowseState::new(10);
        assert_eq!(state.mode(), BrowseMode::Paginated);

        state.set_search("   ");
        assert_eq!(state.mode(), BrowseMode::Paginated);

        state.set_search("aspirin");
        assert_eq!(state.mode(), BrowseMode::Search);

        state.set_search("");
        assert_eq!(state.mode(), BrowseMode::Paginated);
    }

    #[test]
    fn entering_search_mode_disables_forward_navigation() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(10));
        assert!(state.can_next());

        state.set_search("aspirin");
        assert!(!state.can_next());

        // Even a full search result never re-enables paging.
        state.apply_page(meds(10));
        assert!(!state.can_next());
        assert!(!state.can_prev());
    }

    #[test]
    fn search_issues_name_lookup_and_resets_page() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(10));
        state.next_page();
        assert_eq!(state.page(), 2);

        state.set_search("dipyrone");
        assert_eq!(state.page(), 1);
        assert_eq!(
            state.plan(),
            Fetch::Search {
                name: "dipyrone".to_string()
            }
        );
    }

    #[test]
    fn clearing_search_reverts_to_paginated_listing() {
        let mut state = BrowseState::new(10);
        state.set_search("dipyrone");
        state.apply_page(meds(3));

        state.set_search("");
        assert_eq!(
            state.plan(),
            Fetch::Page {
                page: 1,
                page_size: 10
            }
        );
    }

    #[test]
    fn fetch_error_clears_list_and_forward_navigation() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(10));
        assert_eq!(state.medicines().len(), 10);

        state.apply_error();
        assert!(state.medicines().is_empty());
        assert!(!state.can_next());
    }

    #[test]
    fn next_page_noop_when_exhausted() {
        let mut state = BrowseState::new(10);
        state.apply_page(meds(4));
        assert!(!state.next_page());
        assert_eq!(state.page(), 1);
    }

    // Scenario from the listing contract: full first page, short second
    // page, then a search takes over.
    #[test]
    fn paging_then_search_scenario() {
        let mut state = BrowseState::new(10);

        state.apply_page(meds(10));
        assert!(state.can_next());
        assert!(!state.can_prev());

        assert!(state.next_page());
        assert_eq!(
            state.plan(),
            Fetch::Page {
                page: 2,
                page_size: 10
            }
        );
        state.apply_page(meds(4));
        assert!(!state.can_next());
        assert!(state.can_prev());

        state.set_search("aspirin");
        assert_eq!(
            state.plan(),
            Fetch::Search {
                name: "aspirin".to_string()
            }
        );
        assert!(!state.can_next());
    }

    #[test]
    fn debouncer_coalesces_rapid_keystrokes() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();

        // Five keystrokes, 100ms apart: the timer keeps moving forward.
        let mut fires = 0;
        for i in 0..5 {
            let at = start + Duration::from_millis(i * 100);
            debouncer.schedule(at);
            if debouncer.poll(at + Duration::from_millis(99)) {
                fires += 1;
            }
        }
        assert_eq!(fires, 0);

        // 500ms after the last keystroke it fires exactly once.
        let settled = start + Duration::from_millis(400 + 500);
        assert!(debouncer.poll(settled));
        assert!(!debouncer.poll(settled + Duration::from_millis(1)));
        assert_eq!(fires, 0);
    }

    #[test]
    fn debouncer_cancel_disarms() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn debouncer_remaining_counts_down() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        assert!(debouncer.remaining(start).is_none());

        debouncer.schedule(start);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            debouncer.remaining(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }
}
