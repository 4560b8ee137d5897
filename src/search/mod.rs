//! Query text, search mode and the routing between filtering and re-searching.

mod config;
mod debounce;
mod filter;

use std::time::{Duration, Instant};

use atsel_store::{Database, EntrySearcher, TermSearcher};

use crate::collector::collect;
use crate::types::Match;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::{FilterKind, FilterRow, FuzzyFilter, ListFilter, SubstringFilter};

/// How query text is applied to the candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Narrow the original candidates without touching the stores.
    Filter,
    /// Rebuild the candidates by searching every store.
    Search,
}

impl SearchMode {
    /// Mode a session starts in for its initial candidates.
    #[must_use]
    pub fn initial_for(candidates: &[Match]) -> Self {
        if candidates.is_empty() {
            SearchMode::Search
        } else {
            SearchMode::Filter
        }
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            SearchMode::Filter => "filter",
            SearchMode::Search => "search",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            SearchMode::Filter => SearchMode::Search,
            SearchMode::Search => SearchMode::Filter,
        }
    }
}

/// Owns the query text and keeps the displayed candidates in sync with it.
pub struct SearchController {
    mode: SearchMode,
    query: String,
    debounce: Debouncer,
    original: Vec<Match>,
    displayed: Vec<Match>,
    filter: Box<dyn ListFilter>,
    searcher: Box<dyn EntrySearcher>,
    dispatches: u64,
}

impl SearchController {
    /// Start from the caller's candidates, showing all of them.
    pub fn new(original: Vec<Match>, debounce: Duration) -> Self {
        Self {
            mode: SearchMode::initial_for(&original),
            query: String::new(),
            debounce: Debouncer::new(debounce),
            displayed: original.clone(),
            original,
            filter: Box::new(SubstringFilter),
            searcher: Box::new(TermSearcher),
            dispatches: 0,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Box<dyn ListFilter>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_searcher(mut self, searcher: Box<dyn EntrySearcher>) -> Self {
        self.searcher = searcher;
        self
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn original(&self) -> &[Match] {
        &self.original
    }

    pub fn displayed(&self) -> &[Match] {
        &self.displayed
    }

    /// Deadline of the pending debounced dispatch, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Number of dispatches performed so far.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches
    }

    /// Record a text edit and restart the debounce interval.
    ///
    /// Returns `false` when the text did not change.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> bool {
        let text = text.into();
        if text == self.query {
            return false;
        }
        self.query = text;
        self.debounce.arm(now);
        true
    }

    /// Dispatch if the debounce interval has elapsed. Returns whether the
    /// displayed candidates were recomputed.
    pub fn poll(&mut self, now: Instant, stores: &[Database]) -> bool {
        if self.debounce.fire(now) {
            self.dispatch(stores);
            true
        } else {
            false
        }
    }

    /// Switch mode and recompute right away, bypassing the debounce.
    pub fn set_mode(&mut self, mode: SearchMode, stores: &[Database]) {
        log::debug!("search mode {} -> {}", self.mode.id(), mode.id());
        self.mode = mode;
        if mode == SearchMode::Filter {
            self.displayed = self.original.clone();
        }
        self.dispatch(stores);
    }

    /// Empty the query and recompute right away.
    pub fn clear_query(&mut self, stores: &[Database]) {
        self.query.clear();
        self.dispatch(stores);
    }

    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }

    /// Recompute the displayed candidates for the current text and mode.
    pub fn dispatch(&mut self, stores: &[Database]) {
        self.debounce.cancel();
        self.dispatches += 1;
        self.displayed = match self.mode {
            SearchMode::Filter => self.filtered(stores),
            SearchMode::Search => collect(&self.query, stores, self.searcher.as_ref()),
        };
        log::trace!(
            "dispatch #{} ({}) for {:?}: {} candidates",
            self.dispatches,
            self.mode.id(),
            self.query,
            self.displayed.len()
        );
    }

    fn filtered(&self, stores: &[Database]) -> Vec<Match> {
        if self.query.is_empty() {
            return self.original.clone();
        }

        let rows: Vec<FilterRow<'_>> = self
            .original
            .iter()
            .map(|candidate| match candidate.resolve(stores) {
                Some(entry) => FilterRow {
                    title: &entry.title,
                    group: entry.group_path(),
                    username: entry.username(),
                    sequence: &candidate.sequence,
                },
                None => FilterRow {
                    sequence: &candidate.sequence,
                    ..FilterRow::default()
                },
            })
            .collect();

        self.filter
            .retain(&self.query, &rows)
            .into_iter()
            .filter_map(|index| self.original.get(index).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests;
