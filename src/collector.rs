//! Builds candidate sets by searching every store.

use std::collections::HashSet;

use atsel_store::{Database, EntrySearcher};

use crate::types::Match;

/// Search every store for `query` and turn the hits into matches.
///
/// Each entry yields its effective sequence first, then its associated
/// sequences in stored order. Empty sequences and repeats (exact string
/// comparison, first one wins) are skipped. Stores are visited in the order
/// given and entries in the order the searcher returns them. An empty query
/// collects nothing. Store ids must be distinct (see
/// [`ensure_distinct_ids`](atsel_store::ensure_distinct_ids)).
pub fn collect(query: &str, stores: &[Database], searcher: &dyn EntrySearcher) -> Vec<Match> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for store in stores {
        for entry in searcher.search(query, store.root()) {
            let handle = store.entry_ref(entry);
            let mut seen: HashSet<&str> = HashSet::new();
            let sequences =
                std::iter::once(entry.effective_sequence()).chain(entry.associated_sequences());
            for sequence in sequences {
                if !sequence.is_empty() && seen.insert(sequence) {
                    matches.push(Match::new(handle, sequence));
                }
            }
        }
    }

    log::debug!(
        "collected {} matches for {:?} across {} stores",
        matches.len(),
        query,
        stores.len()
    );
    matches
}
