/// Search and filtering over the current snapshot
///
/// Filtering is a pure function of (snapshot, query). The result is kept as
/// indices into the snapshot, so it is a subsequence by construction.
use super::data::{GallerySnapshot, PromptItem};

/// The text currently typed into the search box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    raw: String,
}

impl SearchState {
    /// Replace the query. Returns true if it actually changed.
    pub fn set(&mut self, query: String) -> bool {
        if self.raw == query {
            return false;
        }
        self.raw = query;
        true
    }

    /// Reset to an empty query. Returns true if it actually changed.
    pub fn clear(&mut self) -> bool {
        self.set(String::new())
    }

    /// The query exactly as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True if the query filters anything
    pub fn is_active(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    /// The clear button is visible whenever the box has any text
    pub fn shows_clear(&self) -> bool {
        !self.raw.is_empty()
    }
}

/// Case-insensitive substring match over title or prompt.
/// `needle` must already be lowercase.
pub fn matches(item: &PromptItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle) || item.prompt.to_lowercase().contains(needle)
}

/// Indices of the items matching `query`, in snapshot order
pub fn filter(items: &[PromptItem], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| needle.is_empty() || matches(item, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// The filtered view of a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    indices: Vec<usize>,
    total: usize,
    /// Bumped on every recomputation; lets callers observe re-renders
    generation: u64,
}

impl SearchResults {
    /// Recompute against a snapshot and query
    pub fn refresh(&mut self, snapshot: &GallerySnapshot, search: &SearchState) {
        self.indices = filter(snapshot.items(), search.raw());
        self.total = snapshot.len();
        self.generation += 1;
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// "N of M" indicator, hidden when no query is active
    pub fn indicator(&self, search: &SearchState) -> Option<String> {
        search
            .is_active()
            .then(|| format!("Ditemukan {} dari {} prompt", self.indices.len(), self.total))
    }
}

/// Which of the mutually exclusive gallery states to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    /// At least one card to draw
    Grid,
    /// Nothing matched an active query
    NoResults { query: &'a str },
    /// The feed itself is empty
    NoData,
}

impl<'a> DisplayState<'a> {
    pub fn select(results: &SearchResults, search: &'a SearchState) -> Self {
        if !results.is_empty() {
            DisplayState::Grid
        } else if search.is_active() {
            DisplayState::NoResults { query: search.raw() }
        } else {
            DisplayState::NoData
        }
    }
}
