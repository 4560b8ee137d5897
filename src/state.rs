//! Values remembered between sessions, such as the last dialog size.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::session::WindowSize;

const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to write state file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence for the selection dialog size.
pub trait SizeStore {
    fn load_size(&self) -> Option<WindowSize>;

    fn save_size(&mut self, size: WindowSize) -> Result<(), StateError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedState {
    select_dialog_size: Option<WindowSize>,
}

/// JSON state file, by default `state.json` in the data directory.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file inside the platform data directory.
    ///
    /// # Errors
    ///
    /// Fails when no data directory can be determined.
    pub fn in_data_dir() -> anyhow::Result<Self> {
        Ok(Self::new(app_dirs::get_data_dir()?.join(STATE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PersistedState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return PersistedState::default(),
            Err(err) => {
                log::warn!("ignoring unreadable state file {}: {err}", self.path.display());
                return PersistedState::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            log::warn!("ignoring corrupt state file {}: {err}", self.path.display());
            PersistedState::default()
        })
    }
}

impl SizeStore for StateFile {
    fn load_size(&self) -> Option<WindowSize> {
        self.read().select_dialog_size
    }

    fn save_size(&mut self, size: WindowSize) -> Result<(), StateError> {
        let mut state = self.read();
        state.select_dialog_size = Some(size);
        let json = serde_json::to_string_pretty(&state)?;

        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, json).map_err(io_err)
    }
}

/// Keeps the size in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySizeStore {
    size: Option<WindowSize>,
    saves: usize,
}

impl MemorySizeStore {
    #[must_use]
    pub fn new(size: Option<WindowSize>) -> Self {
        Self { size, saves: 0 }
    }

    /// How many times a size was written.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SizeStore for MemorySizeStore {
    fn load_size(&self) -> Option<WindowSize> {
        self.size
    }

    fn save_size(&mut self, size: WindowSize) -> Result<(), StateError> {
        self.size = Some(size);
        self.saves += 1;
        Ok(())
    }
}
