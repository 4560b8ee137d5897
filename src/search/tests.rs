use std::time::{Duration, Instant};

use atsel_store::{Database, Entry, EntryId, EntryRef, Group, StoreId};

use super::*;

const INTERVAL: Duration = Duration::from_millis(300);

fn stores() -> Vec<Database> {
    let root = Group::new("Root")
        .with_entry(Entry::new(1, "Mail").with_username("bob"))
        .with_entry(Entry::new(2, "Bank").with_username("alice"))
        .with_group(Group::new("Work").with_entry(Entry::new(3, "Wiki")));
    vec![Database::new(StoreId(0), "personal", root).expect("valid store")]
}

fn candidate(entry: u64, sequence: &str) -> Match {
    Match::new(EntryRef::new(StoreId(0), EntryId(entry)), sequence)
}

fn initial() -> Vec<Match> {
    vec![
        candidate(1, "{USERNAME}{ENTER}"),
        candidate(2, "{PASSWORD}"),
        candidate(3, "{TOTP}"),
    ]
}

#[test]
fn mode_follows_initial_candidates() {
    assert_eq!(
        SearchController::new(initial(), INTERVAL).mode(),
        SearchMode::Filter
    );
    assert_eq!(
        SearchController::new(Vec::new(), INTERVAL).mode(),
        SearchMode::Search
    );
}

#[test]
fn filter_matches_entry_and_group_columns() {
    let stores = stores();
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();

    search.set_query("work", start);
    assert!(search.poll(start + INTERVAL, &stores));
    assert_eq!(search.displayed(), &[candidate(3, "{TOTP}")]);

    search.set_query("password", start + INTERVAL);
    assert!(search.poll(start + INTERVAL * 2, &stores));
    assert_eq!(search.displayed(), &[candidate(2, "{PASSWORD}")]);
}

#[test]
fn empty_filter_restores_original_order() {
    let stores = stores();
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();

    search.set_query("bank", start);
    search.poll(start + INTERVAL, &stores);
    assert_eq!(search.displayed().len(), 1);

    search.set_query("", start + INTERVAL);
    search.poll(start + INTERVAL * 2, &stores);
    assert_eq!(search.displayed(), initial().as_slice());
}

#[test]
fn burst_of_edits_dispatches_once_with_last_text() {
    let stores = stores();
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();

    for (step, text) in ["m", "ma", "mai", "mail", "bank"].into_iter().enumerate() {
        let at = start + Duration::from_millis(50 * step as u64);
        search.set_query(text, at);
        assert!(!search.poll(at, &stores));
    }

    let last_edit = start + Duration::from_millis(200);
    assert!(!search.poll(last_edit + INTERVAL - Duration::from_millis(1), &stores));
    assert!(search.poll(last_edit + INTERVAL, &stores));
    assert!(!search.poll(last_edit + INTERVAL * 3, &stores));

    assert_eq!(search.dispatch_count(), 1);
    assert_eq!(search.displayed(), &[candidate(2, "{PASSWORD}")]);
}

#[test]
fn unchanged_text_does_not_rearm() {
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();
    assert!(search.set_query("a", start));
    assert!(!search.set_query("a", start + INTERVAL));
    assert_eq!(search.pending_deadline(), Some(start + INTERVAL));
}

#[test]
fn search_mode_rebuilds_from_stores() {
    let stores = stores();
    let mut search = SearchController::new(Vec::new(), INTERVAL);
    let start = Instant::now();

    search.set_query("ma", start);
    search.poll(start + INTERVAL, &stores);
    assert_eq!(
        search.displayed(),
        &[candidate(1, atsel_store::DEFAULT_SEQUENCE)]
    );

    search.set_query("", start + INTERVAL);
    search.poll(start + INTERVAL * 2, &stores);
    assert!(search.displayed().is_empty());
}

#[test]
fn mode_switch_recomputes_without_debounce() {
    let stores = stores();
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();

    search.set_query("wiki", start);
    search.set_mode(SearchMode::Search, &stores);
    assert!(search.pending_deadline().is_none());
    assert_eq!(
        search.displayed(),
        &[candidate(3, atsel_store::DEFAULT_SEQUENCE)]
    );

    search.set_mode(SearchMode::Filter, &stores);
    assert_eq!(search.displayed(), &[candidate(3, "{TOTP}")]);
    assert_eq!(search.dispatch_count(), 2);
}

#[test]
fn clear_query_dispatches_immediately() {
    let stores = stores();
    let mut search = SearchController::new(initial(), INTERVAL);
    let start = Instant::now();

    search.set_query("bank", start);
    search.poll(start + INTERVAL, &stores);
    search.set_query("bankx", start + INTERVAL);
    search.clear_query(&stores);

    assert_eq!(search.query(), "");
    assert!(search.pending_deadline().is_none());
    assert_eq!(search.displayed(), initial().as_slice());
}

#[test]
fn toggled_swaps_modes() {
    assert_eq!(SearchMode::Filter.toggled(), SearchMode::Search);
    assert_eq!(SearchMode::Search.toggled(), SearchMode::Filter);
}
