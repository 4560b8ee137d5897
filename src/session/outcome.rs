use crate::actions::MenuAction;
use crate::types::Match;

/// Why a session closed without handing back a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancel control was used.
    Cancelled,
    /// Escape was pressed with an empty query.
    Escape,
    /// The window went away before anything was accepted.
    WindowClosed,
    /// A copy action delivered a field to the clipboard.
    Copied(MenuAction),
}

impl CancelReason {
    pub const fn id(self) -> &'static str {
        match self {
            CancelReason::Cancelled => "cancelled",
            CancelReason::Escape => "escape",
            CancelReason::WindowClosed => "window-closed",
            CancelReason::Copied(_) => "copied",
        }
    }
}

/// How a session ended. Reported exactly once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Accepted(Match),
    Cancelled(CancelReason),
}

impl SessionOutcome {
    #[must_use]
    pub fn accepted(&self) -> Option<&Match> {
        match self {
            SessionOutcome::Accepted(selected) => Some(selected),
            SessionOutcome::Cancelled(_) => None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SessionOutcome::Accepted(_))
    }
}
