//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed data and mock factories
//! - Helper assertions

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::config::{CalendarZone, DisplayPreferences};
use crate::db::AppState;
use crate::models::{
  ExerciseId, Gender, MuscleGroup, NewDayTemplate, NewExercise, NewFoodItem, NewPerformedSet, NewPlannedExercise,
  NewTrainingPlan, NewWorkoutLog, NutritionPlan, UserProfile,
};
use crate::store;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// App state over a fresh in-memory database, calendar pinned to UTC
pub async fn setup_test_state() -> AppState {
  AppState {
    db: setup_test_db().await,
    zone: CalendarZone::Fixed(chrono::FixedOffset::east_opt(0).expect("zero offset")),
    default_preferences: DisplayPreferences::default(),
  }
}

/// Seed four exercises (squat, bench, row, curl) and return their ids in that order
pub async fn seed_test_exercises(pool: &SqlitePool) -> Vec<ExerciseId> {
  let exercises = [
    NewExercise::builtin("Barbell Squat", "杠铃深蹲", MuscleGroup::Legs),
    NewExercise::builtin("Barbell Bench Press", "杠铃卧推", MuscleGroup::Chest),
    NewExercise::builtin("Barbell Row", "杠铃划船", MuscleGroup::Back),
    NewExercise::builtin("Barbell Curl", "杠铃弯举", MuscleGroup::Biceps),
  ];

  let mut ids = Vec::new();
  for exercise in &exercises {
    let id = store::exercises::insert_exercise(pool, exercise)
      .await
      .expect("Failed to seed exercise");
    ids.push(id);
  }

  ids
}

/// Seed the exercises and the mock plan; returns (plan id, exercise ids)
pub async fn seed_test_plan(pool: &SqlitePool) -> (i64, Vec<ExerciseId>) {
  let exercise_ids = seed_test_exercises(pool).await;
  let plan_id = store::plans::create_plan(pool, &mock_new_plan(&exercise_ids))
    .await
    .expect("Failed to seed plan");
  (plan_id, exercise_ids)
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn test_start_date() -> NaiveDate {
  // A Monday
  NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date")
}

/// Active 3-day plan starting 2026-01-05:
/// day 1 trains the first three exercises, day 2 the fourth, day 3 rests
pub fn mock_new_plan(exercise_ids: &[ExerciseId]) -> NewTrainingPlan {
  NewTrainingPlan {
    name: "Three Day Split".to_string(),
    cycle_days: 3,
    start_date: test_start_date(),
    is_active: true,
    day_templates: vec![
      NewDayTemplate {
        day_number: 1,
        name: Some("Compound".to_string()),
        is_rest_day: false,
        exercises: exercise_ids
          .iter()
          .take(3)
          .enumerate()
          .map(|(i, id)| NewPlannedExercise::new(*id, i as u32))
          .collect(),
      },
      NewDayTemplate {
        day_number: 2,
        name: Some("Arms".to_string()),
        is_rest_day: false,
        exercises: exercise_ids
          .iter()
          .skip(3)
          .enumerate()
          .map(|(i, id)| NewPlannedExercise::new(*id, i as u32))
          .collect(),
      },
      NewDayTemplate::rest(3),
    ],
  }
}

/// Workout with three sets of 8 x 60 kg (90 s rest) per exercise
pub fn mock_new_workout(date: NaiveDate, exercise_ids: &[ExerciseId]) -> NewWorkoutLog {
  let start = Utc
    .from_utc_datetime(&date.and_hms_opt(18, 0, 0).expect("valid time"));

  let sets = exercise_ids
    .iter()
    .flat_map(|id| {
      (1..=3).map(move |n| NewPerformedSet {
        exercise_id: *id,
        set_number: n,
        reps: 8,
        weight_kg: Some(60.0),
        rest_seconds: Some(90),
        completed_at: start + Duration::minutes(i64::from(n) * 3),
      })
    })
    .collect();

  NewWorkoutLog {
    date,
    started_at: None,
    duration_seconds: None,
    notes: None,
    intensity_rating: None,
    calories_burned: None,
    sets,
  }
}

/// 30-year-old (on 2026-01-05), 70 kg, 175 cm male
pub fn mock_profile() -> UserProfile {
  UserProfile {
    full_name: Some("Test Lifter".to_string()),
    email: None,
    birthday: NaiveDate::from_ymd_opt(1995, 6, 1),
    gender: Gender::Male,
    height_cm: Some(175.0),
    weight_kg: Some(70.0),
  }
}

pub fn mock_nutrition_plan(daily_calorie_target: f64) -> NutritionPlan {
  NutritionPlan {
    id: 0,
    name: "Test Cut".to_string(),
    daily_calorie_target,
    protein_target_g: Some(140.0),
    carbs_target_g: None,
    fat_target_g: None,
    start_date: test_start_date(),
    is_active: true,
    linked_training_plan_id: None,
  }
}

pub fn mock_food(name: &str, calories: f64) -> NewFoodItem {
  NewFoodItem {
    name: name.to_string(),
    calories,
    serving_size: None,
    protein_g: None,
    carbs_g: None,
    fat_g: None,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('training_plans', 'workout_logs', 'plan_completions')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 3);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_plan_shape() {
    let pool = setup_test_db().await;
    let (plan_id, exercise_ids) = seed_test_plan(&pool).await;

    assert_eq!(exercise_ids.len(), 4);
    let plan = store::plans::load_plan(&pool, plan_id).await.expect("load");
    assert_eq!(plan.template(1).map(|t| t.exercises.len()), Some(3));
    assert_eq!(plan.template(2).map(|t| t.exercises.len()), Some(1));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_workout_sets() {
    let log = mock_new_workout(test_start_date(), &[1, 2]);
    assert_eq!(log.sets.len(), 6);
    assert!(log.sets.iter().all(|s| s.reps == 8));
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(1.0_f64, 1.0000001_f64, 0.001);
  }
}
