//! Global calpick configuration at ~/.config/calpick/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalPickError, CalPickResult};
use crate::locale::detect_locale;
use crate::state::{DEFAULT_END_TIME, DEFAULT_START_TIME, PickerOptions};

static DEFAULT_DATA_DIR: &str = "~/.local/share/calpick";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalpickConfig {
    /// Where saved events live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Overrides the locale taken from the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Default for CalpickConfig {
    fn default() -> Self {
        CalpickConfig {
            data_dir: default_data_dir(),
            locale: None,
            start_time: None,
            end_time: None,
        }
    }
}

impl CalpickConfig {
    pub fn config_path() -> CalPickResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalPickError::Config("Could not determine config directory".into()))?
            .join("calpick");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none. `CALPICK_*` environment variables override file values.
    pub fn load() -> CalPickResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalPickResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALPICK"))
            .build()
            .map_err(|e| CalPickError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalPickError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalPickResult<()> {
        let contents = format!(
            "\
# calpick configuration

# Where saved events live:
# data_dir = \"{}\"

# Locale for week layout and weekday names (defaults to LC_ALL / LC_TIME / LANG):
# locale = \"en-GB\"

# Default times for a new selection:
# start_time = \"{}\"
# end_time = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_START_TIME, DEFAULT_END_TIME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalPickError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalPickError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> CalPickResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalPickError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The configured locale, or the one detected from the environment.
    pub fn locale(&self) -> String {
        self.locale
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(detect_locale)
    }

    /// Picker options seeded with the configured default times.
    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            initial_date_range: None,
            initial_start_time: self.start_time.clone(),
            initial_end_time: self.end_time.clone(),
        }
    }
}
