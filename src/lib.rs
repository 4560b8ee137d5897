//! Auto-type match selection engine.
//!
//! When several credential entries match an auto-type request, a
//! [`SelectionSession`] lets the user narrow the candidates, move through
//! them and settle on exactly one `(entry, sequence)` pair. The [`ui`] module
//! drives a session from a terminal; embedders with their own frontend talk
//! to the session directly.

pub mod actions;
pub mod app_dirs;
pub mod collector;
pub mod logging;
pub mod navigator;
pub mod search;
pub mod session;
pub mod settings;
pub mod state;
pub mod trigger;
pub mod types;
pub mod ui;

pub use actions::{ActionMenuState, MenuAction};
pub use collector::collect;
pub use navigator::SelectionNavigator;
pub use search::{FilterKind, ListFilter, SearchController, SearchMode};
pub use session::{
    CancelReason, Key, Placement, ScreenArea, SelectionSession, SessionOptions, SessionOutcome,
    WindowSize,
};
pub use settings::Settings;
pub use state::{MemorySizeStore, SizeStore, StateFile};
pub use trigger::{DialogGuard, TriggerDecision, TriggerOptions, decide, gather_window_matches};
pub use types::Match;

pub use atsel_store as store;
