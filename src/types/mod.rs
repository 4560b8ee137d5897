use serde::Serialize;

use atsel_store::{Database, Entry, EntryRef, resolve_in};

/// A candidate pairing of an entry with the sequence to type for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub entry: EntryRef,
    pub sequence: String,
}

impl Match {
    #[must_use]
    pub fn new(entry: EntryRef, sequence: impl Into<String>) -> Self {
        Self {
            entry,
            sequence: sequence.into(),
        }
    }

    /// Look the referenced entry up among the session's stores.
    pub fn resolve<'s>(&self, stores: &'s [Database]) -> Option<&'s Entry> {
        resolve_in(stores, self.entry)
    }

    /// Same entry, different sequence.
    #[must_use]
    pub fn with_sequence(&self, sequence: impl Into<String>) -> Self {
        Self::new(self.entry, sequence)
    }
}
