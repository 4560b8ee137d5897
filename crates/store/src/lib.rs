//! Read-only view of unlocked credential stores.
//!
//! The selection engine never owns a store. It borrows a slice of
//! [`Database`] values for the duration of one session and refers to entries
//! through [`EntryRef`] handles, so nothing in here outlives the caller's copy.

pub mod clipboard;
pub mod error;
pub mod model;
pub mod search;
pub mod window;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use error::StoreError;
pub use model::{
    Association, AutoTypeSettings, DEFAULT_SEQUENCE, Database, Entry, EntryId, EntryRef, Group,
    StoreId, ensure_distinct_ids, resolve_in,
};
pub use search::{EntrySearcher, TermSearcher};
pub use window::window_matches;
