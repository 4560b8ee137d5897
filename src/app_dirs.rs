//! Where `atsel` keeps its configuration and remembered state.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    /// Holds `config.toml`.
    Config,
    /// Holds `state.json`.
    Data,
}

impl Location {
    const fn override_var(self) -> &'static str {
        match self {
            Location::Config => "ATSEL_CONFIG_DIR",
            Location::Data => "ATSEL_DATA_DIR",
        }
    }

    fn resolve(self) -> Result<PathBuf> {
        if let Some(dir) = non_empty(env::var_os(self.override_var())) {
            return Ok(dir);
        }
        let dirs = ProjectDirs::from("org", "atsel", "atsel")
            .ok_or_else(|| anyhow!("no home directory to place atsel files in"))?;
        Ok(match self {
            Location::Config => dirs.config_local_dir(),
            Location::Data => dirs.data_local_dir(),
        }
        .to_path_buf())
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// `ATSEL_CONFIG_DIR`, else the platform config directory.
pub fn get_config_dir() -> Result<PathBuf> {
    Location::Config.resolve()
}

/// `ATSEL_DATA_DIR`, else the platform data directory.
pub fn get_data_dir() -> Result<PathBuf> {
    Location::Data.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(OsString::new())), None);
        assert_eq!(
            non_empty(Some(OsString::from("/tmp/atsel"))),
            Some(PathBuf::from("/tmp/atsel"))
        );
    }
}
