use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use tracing::info;

use crate::config::{AppConfig, CalendarZone, DisplayPreferences};
use crate::error::AppResult;

pub type DbPool = SqlitePool;

/// Application state shared by every command
pub struct AppState {
  pub db: DbPool,
  pub zone: CalendarZone,
  /// Used until the user saves preferences of their own
  pub default_preferences: DisplayPreferences,
}

impl AppState {
  pub async fn open(config: &AppConfig) -> AppResult<Self> {
    let db = initialize_db(config).await?;
    Ok(Self {
      db,
      zone: config.zone,
      default_preferences: config.preferences,
    })
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &AppConfig) -> AppResult<DbPool> {
  // Create directory if it doesn't exist
  if let Some(dir) = &config.data_dir {
    fs::create_dir_all(dir)?;
  }

  info!(url = %config.database_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
