//! Error types shared by the store and command layers
//!
//! The pure calculators (schedule, completion, calendar, calories) never fail;
//! their "no answer" outcomes are `0` or `None`. Everything that touches the
//! database or the environment returns `AppError`.

use serde::Serialize;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Filesystem error: {0}")]
  Io(#[from] std::io::Error),

  #[error("{0} not found")]
  NotFound(String),

  #[error("Invalid input: {0}")]
  Invalid(String),

  #[error("Failed to encode stored value: {0}")]
  Encoding(#[from] serde_json::Error),
}

// Serialized as its message so a frontend can display it directly
impl Serialize for AppError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

pub type AppResult<T> = Result<T, AppError>;
