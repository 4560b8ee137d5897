//! Layered configuration: config files, then `ATSEL_*` environment variables.

use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::app_dirs;
use crate::search::FilterKind;
use crate::session::WindowSize;

/// Longest accepted debounce interval.
const MAX_DEBOUNCE_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub select: SelectSettings,
    pub autotype: AutoTypeSection,
}

/// Behaviour of the selection dialog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectSettings {
    pub debounce_ms: u64,
    pub filter: FilterKind,
    pub default_width: u16,
    pub default_height: u16,
}

impl Default for SelectSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            filter: FilterKind::Substring,
            default_width: 80,
            default_height: 20,
        }
    }
}

impl SelectSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn default_size(&self) -> WindowSize {
        WindowSize::new(self.default_width, self.default_height)
    }
}

/// Global auto-type trigger behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoTypeSection {
    /// Show the dialog even for a single match.
    pub always_ask: bool,
    pub hide_expired: bool,
}

/// Where settings are read from.
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    /// Skip the config directory and working directory files.
    pub skip_defaults: bool,
    /// Additional files, all of which must exist.
    pub files: Vec<PathBuf>,
}

impl Settings {
    /// Read and validate settings from `sources` plus the environment.
    ///
    /// # Errors
    ///
    /// Fails when a required file is missing, a source cannot be parsed or a
    /// value is out of range.
    pub fn load(sources: &SettingsSources) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if !sources.skip_defaults {
            for path in default_config_files() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }
        for path in &sources.files {
            builder = builder.add_source(File::from(path.clone()).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("atsel")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        log::debug!("loaded settings: {settings:?}");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.select.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SettingsError::Invalid {
                key: "select.debounce_ms",
                reason: format!("must be at most {MAX_DEBOUNCE_MS}"),
            });
        }
        if self.select.default_width == 0 || self.select.default_height == 0 {
            return Err(SettingsError::Invalid {
                key: "select.default_width/default_height",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Human readable dump used by `--print-config`.
    pub fn summary(&self) -> String {
        let mut out = String::from("Effective configuration:\n");
        let _ = writeln!(out, "  Debounce: {} ms", self.select.debounce_ms);
        let _ = writeln!(out, "  Filter: {}", self.select.filter.id());
        let _ = writeln!(
            out,
            "  Default size: {}x{}",
            self.select.default_width, self.select.default_height
        );
        let _ = writeln!(out, "  Always ask: {}", bool_to_word(self.autotype.always_ask));
        let _ = writeln!(
            out,
            "  Hide expired: {}",
            bool_to_word(self.autotype.hide_expired)
        );
        out
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }
    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join("atsel.toml"));
    }

    files
}
