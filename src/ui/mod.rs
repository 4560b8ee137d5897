//! Terminal frontend for a [`SelectionSession`](crate::SelectionSession).
//!
//! [`Dialog`] maps terminal input onto the session and draws it; [`run`]
//! owns the terminal for the lifetime of one session.

mod clipboard;
mod input;
mod render;
mod runtime;
mod state;

pub use clipboard::Osc52Clipboard;
pub use runtime::run;
pub use state::Dialog;
