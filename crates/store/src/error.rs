use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{EntryId, StoreId};

/// Errors raised while loading stores or handing them to a session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries in the same store claimed the same identifier.
    #[error("entry id {entry} appears more than once in store {store}")]
    DuplicateEntry { store: StoreId, entry: EntryId },

    #[error("store id {0} is used by more than one store")]
    DuplicateStore(StoreId),
}
