// --- File: crates/lendly_config/src/models.rs ---

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingError {
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),
}

// --- Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    /// IANA zone used to decide what "today" is, e.g. "Europe/Zurich".
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// First column of the month grid ("Mon" or "Sun" are the usual choices).
    #[serde(default = "default_week_start")]
    pub week_starts_on: String,
}

impl CalendarConfig {
    pub fn tz(&self) -> Result<Tz, SettingError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| SettingError::UnknownTimeZone(self.time_zone.clone()))
    }

    pub fn week_start(&self) -> Result<Weekday, SettingError> {
        self.week_starts_on
            .parse::<Weekday>()
            .map_err(|_| SettingError::UnknownWeekday(self.week_starts_on.clone()))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            week_starts_on: default_week_start(),
        }
    }
}

// --- Storage Config ---
// Without a path the record store lives in memory only.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    pub path: Option<String>,
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_week_start() -> String {
    "Mon".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
