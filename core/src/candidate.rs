//! Candidate list shown for the current syllable.
//!
//! The list is rebuilt from the dictionary on every buffer change and keeps
//! the stored candidate order. Paging and a highlighted cursor let hosts with
//! a small display surface show it a page at a time.

use std::ops::Range;

/// Default number of candidates per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A paginated list of candidate strings with cursor navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<String>,
    page_size: usize,
    current_page: usize,
    /// Cursor position within the current page (0-based)
    cursor: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a candidate list with specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
            cursor: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the candidates, resetting pagination state.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.current_page = 0;
        self.cursor = 0;
    }

    /// All candidates in stored order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Get the cursor position within the current page (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.candidates.len());
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    fn current_page_len(&self) -> usize {
        self.current_page_range().len()
    }

    /// Candidates on the current page.
    pub fn current_page_candidates(&self) -> &[String] {
        &self.candidates[self.current_page_range()]
    }

    /// Global index for a position on the current page.
    pub fn global_index(&self, page_index: usize) -> Option<usize> {
        if page_index < self.current_page_len() {
            Some(self.current_page * self.page_size + page_index)
        } else {
            None
        }
    }

    /// Global index of the highlighted candidate.
    pub fn selected_index(&self) -> Option<usize> {
        self.global_index(self.cursor)
    }

    /// The highlighted candidate.
    pub fn selected_candidate(&self) -> Option<&str> {
        self.selected_index().and_then(|i| self.get(i))
    }

    /// Move cursor up (to previous candidate on current page).
    /// Returns true if the cursor moved.
    pub fn cursor_up(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move cursor down (to next candidate on current page).
    /// Returns true if the cursor moved.
    pub fn cursor_down(&mut self) -> bool {
        if self.cursor + 1 < self.current_page_len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page.
    /// Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        self.clamp_cursor();
        true
    }

    /// Move to the next page.
    /// Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        if self.current_page + 1 >= self.num_pages() {
            return false;
        }
        self.current_page += 1;
        self.clamp_cursor();
        true
    }

    fn clamp_cursor(&mut self) {
        let page_len = self.current_page_len();
        if page_len > 0 && self.cursor >= page_len {
            self.cursor = page_len - 1;
        }
    }

    /// Remove all candidates.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.current_page = 0;
        self.cursor = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}
