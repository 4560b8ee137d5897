//! Global auto-type: turning a foreground window title into candidates and
//! deciding whether the user has to pick one.

use std::sync::atomic::{AtomicBool, Ordering};

use atsel_store::Database;

use crate::settings::Settings;
use crate::types::Match;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Show the selection dialog even when only one match exists.
    pub always_ask: bool,
    /// Leave expired entries out of the candidates.
    pub hide_expired: bool,
}

impl TriggerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            always_ask: settings.autotype.always_ask,
            hide_expired: settings.autotype.hide_expired,
        }
    }
}

/// What to do with the candidates of a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Let the user choose in a selection session.
    Select(Vec<Match>),
    /// Exactly one candidate and no need to ask.
    Execute(Match),
    /// Nothing matched.
    Reject,
}

/// Candidates for the window titled `window_title`.
///
/// Entries with auto-type disabled (directly or through a group) are
/// skipped, as are expired entries when `hide_expired` is set. Each entry
/// contributes one match per distinct sequence its associations pick for
/// the window.
pub fn gather_window_matches(
    window_title: &str,
    stores: &[Database],
    options: &TriggerOptions,
) -> Vec<Match> {
    if window_title.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for store in stores {
        for entry in store.root().entries_recursive() {
            if !entry.auto_type_enabled() || (options.hide_expired && entry.expired) {
                continue;
            }
            let handle = store.entry_ref(entry);
            matches.extend(
                entry
                    .sequences_for_window(window_title)
                    .into_iter()
                    .map(|sequence| Match::new(handle, sequence)),
            );
        }
    }
    log::debug!("{} matches for window {window_title:?}", matches.len());
    matches
}

pub fn decide(mut matches: Vec<Match>, options: &TriggerOptions) -> TriggerDecision {
    if options.always_ask || matches.len() > 1 {
        return TriggerDecision::Select(matches);
    }
    match matches.pop() {
        Some(only) => TriggerDecision::Execute(only),
        None => TriggerDecision::Reject,
    }
}

/// Allows one selection dialog at a time.
///
/// For long-running embedders that may see a second trigger while a dialog
/// is still open. A one-shot process never contends for it.
#[derive(Debug, Default)]
pub struct DialogGuard {
    busy: AtomicBool,
}

impl DialogGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the dialog slot. `None` while another ticket is alive.
    pub fn try_acquire(&self) -> Option<DialogTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| DialogTicket { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the dialog slot when dropped.
#[derive(Debug)]
pub struct DialogTicket<'a> {
    guard: &'a DialogGuard,
}

impl Drop for DialogTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use atsel_store::{DEFAULT_SEQUENCE, Entry, EntryId, EntryRef, Group, StoreId};

    use super::*;

    fn stores() -> Vec<Database> {
        let root = Group::new("Root")
            .with_entry(Entry::new(1, "Mail").with_association("*Browser*", "{TOTP}"))
            .with_entry(Entry::new(2, "Old Mail").with_expired(true))
            .with_entry(Entry::new(3, "Mail").with_auto_type(false))
            .with_group(
                Group::new("Hidden")
                    .with_auto_type(false)
                    .with_entry(Entry::new(4, "Mail")),
            );
        vec![Database::new(StoreId(0), "s", root).expect("valid store")]
    }

    fn candidate(entry: u64, sequence: &str) -> Match {
        Match::new(EntryRef::new(StoreId(0), EntryId(entry)), sequence)
    }

    #[test]
    fn gathers_sequences_for_the_window() {
        let stores = stores();
        let matches =
            gather_window_matches("Old Mail - Browser", &stores, &TriggerOptions::default());
        assert_eq!(
            matches,
            vec![
                candidate(1, "{TOTP}"),
                candidate(1, DEFAULT_SEQUENCE),
                candidate(2, DEFAULT_SEQUENCE),
            ]
        );
    }

    #[test]
    fn expired_entries_can_be_hidden() {
        let stores = stores();
        let options = TriggerOptions {
            hide_expired: true,
            ..TriggerOptions::default()
        };
        let matches = gather_window_matches("Old Mail - Browser", &stores, &options);
        assert!(matches.iter().all(|m| m.entry.entry != EntryId(2)));
    }

    #[test]
    fn blank_title_has_no_matches() {
        assert!(gather_window_matches("", &stores(), &TriggerOptions::default()).is_empty());
    }

    #[test]
    fn decision_depends_on_count_and_always_ask() {
        let defaults = TriggerOptions::default();
        assert_eq!(decide(Vec::new(), &defaults), TriggerDecision::Reject);
        assert_eq!(
            decide(vec![candidate(1, "{TOTP}")], &defaults),
            TriggerDecision::Execute(candidate(1, "{TOTP}"))
        );
        let two = vec![candidate(1, "{TOTP}"), candidate(2, "{TOTP}")];
        assert_eq!(decide(two.clone(), &defaults), TriggerDecision::Select(two));

        let ask = TriggerOptions {
            always_ask: true,
            ..defaults
        };
        assert_eq!(
            decide(vec![candidate(1, "{TOTP}")], &ask),
            TriggerDecision::Select(vec![candidate(1, "{TOTP}")])
        );
        assert_eq!(decide(Vec::new(), &ask), TriggerDecision::Select(Vec::new()));
    }

    #[test]
    fn guard_allows_one_dialog_at_a_time() {
        let guard = DialogGuard::new();
        let ticket = guard.try_acquire().expect("first");
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());
        drop(ticket);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }
}
