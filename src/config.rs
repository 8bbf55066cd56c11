//! Runtime configuration
//!
//! Everything here is loaded once at startup (after `.env` is read) and then
//! passed around explicitly inside `AppState`. Display preferences start from
//! the environment defaults and are replaced by the persisted row once the
//! user saves one.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DATABASE_URL_VAR: &str = "WORKOUT_NOW_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "WORKOUT_NOW_MAX_CONNECTIONS";
pub const UTC_OFFSET_VAR: &str = "WORKOUT_NOW_UTC_OFFSET_MINUTES";
pub const THEME_VAR: &str = "WORKOUT_NOW_THEME";
pub const LANGUAGE_VAR: &str = "WORKOUT_NOW_LANGUAGE";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DB_FILE_NAME: &str = "workout-now.db";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid value for {0}: {1}")]
  Invalid(String, String),
}

/// ---------------------------------------------------------------------------
/// Display Preferences
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
  #[default]
  System,
  Light,
  Dark,
}

impl std::fmt::Display for Theme {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::System => write!(f, "system"),
      Self::Light => write!(f, "light"),
      Self::Dark => write!(f, "dark"),
    }
  }
}

impl std::str::FromStr for Theme {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "system" => Ok(Self::System),
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      other => Err(format!("Unknown theme: {}", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
  #[default]
  English,
  Chinese,
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::English => write!(f, "english"),
      Self::Chinese => write!(f, "chinese"),
    }
  }
}

impl std::str::FromStr for Language {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "english" | "en" => Ok(Self::English),
      "chinese" | "zh" | "zh-hans" => Ok(Self::Chinese),
      other => Err(format!("Unknown language: {}", other)),
    }
  }
}

/// Theme and language, handed to whatever renders the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayPreferences {
  pub theme: Theme,
  pub language: Language,
}

/// ---------------------------------------------------------------------------
/// Calendar Zone
/// ---------------------------------------------------------------------------

/// The one calendar used to turn instants into days. Plans, logs and
/// completions all compare `NaiveDate`s produced through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarZone {
  Local,
  Fixed(FixedOffset),
}

impl CalendarZone {
  pub fn today(&self) -> NaiveDate {
    self.day_of(Utc::now())
  }

  pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
    match self {
      CalendarZone::Local => instant.with_timezone(&Local).date_naive(),
      CalendarZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// App Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  /// Directory that must exist before connecting (None when the URL was given explicitly)
  pub data_dir: Option<PathBuf>,
  pub max_connections: u32,
  pub zone: CalendarZone,
  pub preferences: DisplayPreferences,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let (database_url, data_dir) = match env::var(DATABASE_URL_VAR) {
      Ok(url) if !url.trim().is_empty() => (url, None),
      _ => {
        let dirs = ProjectDirs::from("com", "workoutnow", "WorkOutNow")
          .ok_or_else(|| ConfigError::MissingConfig("application data directory".into()))?;
        let data_dir = dirs.data_dir().to_path_buf();
        let url = format!("sqlite://{}?mode=rwc", data_dir.join(DB_FILE_NAME).display());
        (url, Some(data_dir))
      }
    };

    let max_connections = match env::var(MAX_CONNECTIONS_VAR) {
      Ok(raw) => raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::Invalid(MAX_CONNECTIONS_VAR.into(), raw))?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let zone = match env::var(UTC_OFFSET_VAR) {
      Ok(raw) => {
        let offset = raw
          .trim()
          .parse::<i32>()
          .ok()
          .and_then(|minutes| minutes.checked_mul(60))
          .and_then(FixedOffset::east_opt)
          .ok_or_else(|| ConfigError::Invalid(UTC_OFFSET_VAR.into(), raw))?;
        CalendarZone::Fixed(offset)
      }
      Err(_) => CalendarZone::Local,
    };

    let theme = match env::var(THEME_VAR) {
      Ok(raw) => raw
        .parse()
        .map_err(|_| ConfigError::Invalid(THEME_VAR.into(), raw))?,
      Err(_) => Theme::default(),
    };

    let language = match env::var(LANGUAGE_VAR) {
      Ok(raw) => raw
        .parse()
        .map_err(|_| ConfigError::Invalid(LANGUAGE_VAR.into(), raw))?,
      Err(_) => Language::default(),
    };

    Ok(Self {
      database_url,
      data_dir,
      max_connections,
      zone,
      preferences: DisplayPreferences { theme, language },
    })
  }

  /// Config for an in-memory database (tests, throwaway sessions)
  pub fn in_memory() -> Self {
    Self {
      database_url: "sqlite::memory:".to_string(),
      data_dir: None,
      max_connections: 1,
      zone: CalendarZone::Fixed(Utc.fix()),
      preferences: DisplayPreferences::default(),
    }
  }
}
