pub mod calendar;
pub mod calories;
pub mod commands;
pub mod completion;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod schedule;
pub mod store;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use error::AppResult;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Start-up for the binary: read `.env`, open the database, make sure the
/// exercise catalog exists and print today's training as JSON.
pub async fn run() -> AppResult<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = AppConfig::from_env()?;
  let state = AppState::open(&config).await?;

  store::exercises::seed_default_exercises(&state.db).await?;

  let today = commands::today_training(&state).await?;
  info!(date = %today.date, cycle_day = today.cycle_day, "Database ready");

  println!("{}", serde_json::to_string_pretty(&today)?);

  state.db.close().await;
  Ok(())
}
