//! Loader configuration file support.
//!
//! Reads the few tunable loader settings from a TOML file. Every key is
//! optional; a missing file section falls back to its defaults.
//!
//! ```toml
//! [time]
//! format = "%H:%M:%S"
//! anchor_date = "1970-01-01"
//!
//! [durations]
//! negative = "allow"
//!
//! [sheets]
//! xlsx = "Jobs"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::SourceFormat;
use crate::models::TimeFormat;
use crate::parsing::time_parser::default_anchor_date;
use crate::parsing::{DurationConverter, NegativeDurationPolicy, TimeParser};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "jsv.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No {} found in standard locations", CONFIG_FILE_NAME)]
    NotFound,
}

/// Loader configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub time: TimeSettings,
    #[serde(default)]
    pub durations: DurationSettings,
    #[serde(default)]
    pub sheets: SheetSettings,
}

/// Clock-time parsing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSettings {
    #[serde(default)]
    pub format: TimeFormat,
    /// Reference date every clock time of a load is anchored on
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            format: TimeFormat::default(),
            anchor_date: default_anchor_date(),
        }
    }
}

/// Duration conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSettings {
    #[serde(default)]
    pub negative: NegativeDurationPolicy,
}

/// Per-format sheet name overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlsx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ods: Option<String>,
}

impl SheetSettings {
    /// Configured sheet name for `format`, if any.
    pub fn sheet_for(&self, format: SourceFormat) -> Option<&str> {
        match format {
            SourceFormat::Xlsx => self.xlsx.as_deref(),
            SourceFormat::Ods => self.ods.as_deref(),
        }
    }
}

impl LoaderConfig {
    /// Load loader configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(LoaderConfig)` if successful
    /// * `Err(ConfigError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse loader configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load loader configuration from the default location.
    ///
    /// Searches for `jsv.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Time parser for these settings.
    pub fn time_parser(&self) -> TimeParser {
        TimeParser::new(self.time.format.clone(), self.time.anchor_date)
    }

    /// Duration converter for these settings.
    pub fn duration_converter(&self) -> DurationConverter {
        DurationConverter::new(self.durations.negative)
    }
}
