//! The selection dialog's controller.
//!
//! A [`SelectionSession`] is opened with the caller's candidates and the
//! stores they came from. Input events move it around until it closes with
//! either an accepted [`Match`] or a cancellation. Every method that can
//! close the session returns the [`SessionOutcome`] on the call that closes
//! it and `None` otherwise; a closed session ignores further input.

mod geometry;
mod outcome;

use std::time::{Duration, Instant};

use atsel_store::{
    Clipboard, Database, Entry, EntrySearcher, StoreError, TermSearcher, ensure_distinct_ids,
};

use crate::actions::{ActionMenuState, MenuAction};
use crate::navigator::SelectionNavigator;
use crate::search::{DEFAULT_DEBOUNCE, ListFilter, SearchController, SearchMode, SubstringFilter};
use crate::settings::Settings;
use crate::state::SizeStore;
use crate::types::Match;

pub use geometry::{Placement, ScreenArea, WindowSize, place};
pub use outcome::{CancelReason, SessionOutcome};

/// Size used when nothing has been persisted yet.
pub const DEFAULT_WINDOW_SIZE: WindowSize = WindowSize::new(80, 20);

/// Keys the session understands, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    /// Toggle between filtering and searching.
    Tab,
    Backspace,
    Char(char),
}

/// Collaborators and tunables for a session.
pub struct SessionOptions {
    pub debounce: Duration,
    pub filter: Box<dyn ListFilter>,
    pub searcher: Box<dyn EntrySearcher>,
    pub default_size: WindowSize,
}

impl SessionOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            debounce: settings.select.debounce(),
            filter: settings.select.filter.build(),
            searcher: Box::new(TermSearcher),
            default_size: settings.select.default_size(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            filter: Box::new(SubstringFilter),
            searcher: Box::new(TermSearcher),
            default_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

pub struct SelectionSession<'s> {
    stores: &'s [Database],
    sizes: &'s mut dyn SizeStore,
    search: SearchController,
    navigator: SelectionNavigator,
    actions: ActionMenuState,
    size: WindowSize,
    outcome: Option<SessionOutcome>,
}

impl<'s> SelectionSession<'s> {
    /// Open a session over `initial` candidates drawn from `stores`.
    ///
    /// The session starts in filter mode when there are candidates and in
    /// search mode otherwise. The last persisted size is restored from
    /// `sizes` and written back when the session closes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateStore`] when two stores share an id,
    /// since their entry handles could not be told apart.
    pub fn open(
        initial: Vec<Match>,
        stores: &'s [Database],
        options: SessionOptions,
        sizes: &'s mut dyn SizeStore,
    ) -> Result<Self, StoreError> {
        ensure_distinct_ids(stores)?;
        let size = sizes.load_size().unwrap_or(options.default_size);
        let search = SearchController::new(initial, options.debounce)
            .with_filter(options.filter)
            .with_searcher(options.searcher);
        log::info!(
            "opening selection with {} candidates across {} stores ({} mode)",
            search.original().len(),
            stores.len(),
            search.mode().id()
        );

        let mut session = Self {
            stores,
            sizes,
            navigator: SelectionNavigator::new(search.displayed().len()),
            search,
            actions: ActionMenuState::DISABLED,
            size,
            outcome: None,
        };
        session.refresh_actions();
        Ok(session)
    }

    pub fn stores(&self) -> &'s [Database] {
        self.stores
    }

    pub fn mode(&self) -> SearchMode {
        self.search.mode()
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Candidates as currently displayed.
    pub fn candidates(&self) -> &[Match] {
        self.search.displayed()
    }

    /// Candidates the session was opened with.
    pub fn original(&self) -> &[Match] {
        self.search.original()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.navigator.current()
    }

    pub fn current_match(&self) -> Option<&Match> {
        self.navigator
            .current()
            .and_then(|index| self.search.displayed().get(index))
    }

    pub fn current_entry(&self) -> Option<&'s Entry> {
        let stores = self.stores;
        self.current_match().and_then(|selected| selected.resolve(stores))
    }

    pub fn entry_for(&self, candidate: &Match) -> Option<&'s Entry> {
        candidate.resolve(self.stores)
    }

    pub fn action_state(&self) -> ActionMenuState {
        self.actions
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Where the dialog goes on `screen`.
    pub fn placement(&self, screen: ScreenArea) -> Placement {
        place(self.size, screen)
    }

    /// When the next debounced dispatch is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.pending_deadline()
    }

    pub fn resize(&mut self, size: WindowSize) {
        if self.is_open() {
            self.size = size;
        }
    }

    /// Replace the query text. The displayed candidates follow once the
    /// debounce interval passes without further edits.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        if self.is_open() {
            self.search.set_query(text, now);
        }
    }

    /// Drive the debounce deadline. Returns whether a dispatch happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_open() || !self.search.poll(now, self.stores) {
            return false;
        }
        self.after_dispatch();
        true
    }

    /// Apply a pending query edit immediately.
    pub fn flush(&mut self) {
        if self.is_open() && self.search.pending_deadline().is_some() {
            self.search.dispatch(self.stores);
            self.after_dispatch();
        }
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        if self.is_open() {
            self.search.set_mode(mode, self.stores);
            self.after_dispatch();
        }
    }

    pub fn move_up(&mut self) {
        if self.is_open() && self.navigator.move_up() {
            self.refresh_actions();
        }
    }

    pub fn move_down(&mut self) {
        if self.is_open() && self.navigator.move_down() {
            self.refresh_actions();
        }
    }

    /// Pointer selection of a displayed row.
    pub fn select(&mut self, index: usize) {
        if self.is_open() && self.navigator.select(index) {
            self.refresh_actions();
        }
    }

    /// Accept the current match. A no-op without a selection.
    pub fn activate(&mut self) -> Option<SessionOutcome> {
        let selected = self.current_match()?.clone();
        self.finish(SessionOutcome::Accepted(selected))
    }

    /// Select and accept a row in one step, as a double click does.
    pub fn activate_index(&mut self, index: usize) -> Option<SessionOutcome> {
        if !self.is_open() || !self.navigator.select(index) {
            return None;
        }
        self.refresh_actions();
        self.activate()
    }

    /// Run a menu action against the current match.
    ///
    /// Type actions accept the entry with the action's placeholder. Copy
    /// actions hand the field to `clipboard` and cancel, since no sequence is
    /// returned to the caller. Disabled actions do nothing.
    pub fn trigger(
        &mut self,
        action: MenuAction,
        clipboard: &mut dyn Clipboard,
    ) -> Option<SessionOutcome> {
        if !self.is_open() || !self.actions.is_enabled(action) {
            return None;
        }
        let selected = self.current_match()?.clone();

        if let Some(placeholder) = action.placeholder() {
            return self.finish(SessionOutcome::Accepted(selected.with_sequence(placeholder)));
        }

        let entry = self.current_entry()?;
        let text = action.copied_text(entry)?;
        clipboard.set_text(text);
        self.finish(SessionOutcome::Cancelled(CancelReason::Copied(action)))
    }

    /// Escape clears a non-empty query and cancels on an empty one.
    pub fn escape(&mut self) -> Option<SessionOutcome> {
        if !self.is_open() {
            return None;
        }
        if self.search.query().is_empty() {
            return self.finish(SessionOutcome::Cancelled(CancelReason::Escape));
        }
        self.search.clear_query(self.stores);
        self.after_dispatch();
        None
    }

    pub fn cancel(&mut self) -> Option<SessionOutcome> {
        self.finish(SessionOutcome::Cancelled(CancelReason::Cancelled))
    }

    /// The window is going away. Cancels unless something was accepted.
    pub fn close_window(&mut self) -> Option<SessionOutcome> {
        self.finish(SessionOutcome::Cancelled(CancelReason::WindowClosed))
    }

    /// Keyboard entry point used by frontends.
    pub fn handle_key(&mut self, key: Key, now: Instant) -> Option<SessionOutcome> {
        if !self.is_open() {
            return None;
        }
        match key {
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Enter => return self.activate(),
            Key::Escape => return self.escape(),
            Key::Tab => self.set_mode(self.mode().toggled()),
            Key::Backspace => {
                let mut text = self.query().to_string();
                if text.pop().is_some() {
                    self.set_query(text, now);
                }
            }
            Key::Char(ch) => {
                let mut text = self.query().to_string();
                text.push(ch);
                self.set_query(text, now);
            }
        }
        None
    }

    fn after_dispatch(&mut self) {
        self.navigator.reset(self.search.displayed().len());
        self.refresh_actions();
    }

    fn refresh_actions(&mut self) {
        self.actions = ActionMenuState::resolve(self.current_entry());
    }

    fn finish(&mut self, outcome: SessionOutcome) -> Option<SessionOutcome> {
        if !self.is_open() {
            return None;
        }
        self.search.cancel_pending();
        if let Err(err) = self.sizes.save_size(self.size) {
            log::warn!("could not remember dialog size: {err}");
        }
        match &outcome {
            SessionOutcome::Accepted(selected) => log::info!(
                "accepted entry {} of store {} with {:?}",
                selected.entry.entry,
                selected.entry.store,
                selected.sequence
            ),
            SessionOutcome::Cancelled(reason) => log::info!("selection cancelled ({reason:?})"),
        }
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }
}
