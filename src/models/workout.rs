use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ExerciseId, WorkoutLogId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
  pub id: WorkoutLogId,
  pub date: NaiveDate,
  pub started_at: Option<NaiveTime>,
  pub duration_seconds: Option<i64>,
  pub notes: Option<String>,
  /// User-reported effort, 1-10
  pub intensity_rating: Option<u8>,
  pub calories_burned: Option<f64>,
  pub sets: Vec<PerformedSet>,
}

impl WorkoutLog {
  /// Exercises with at least one performed set
  pub fn performed_exercise_ids(&self) -> BTreeSet<ExerciseId> {
    self.sets.iter().map(|s| s.exercise_id).collect()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformedSet {
  pub id: i64,
  pub log_id: WorkoutLogId,
  pub exercise_id: ExerciseId,
  pub set_number: u32,
  pub reps: u32,
  pub weight_kg: Option<f64>,
  pub rest_seconds: Option<u32>,
  pub completed_at: DateTime<Utc>,
}

/// For inserting new workout logs (without ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutLog {
  pub date: NaiveDate,
  pub started_at: Option<NaiveTime>,
  pub duration_seconds: Option<i64>,
  pub notes: Option<String>,
  pub intensity_rating: Option<u8>,
  pub calories_burned: Option<f64>,
  pub sets: Vec<NewPerformedSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerformedSet {
  pub exercise_id: ExerciseId,
  pub set_number: u32,
  pub reps: u32,
  pub weight_kg: Option<f64>,
  pub rest_seconds: Option<u32>,
  pub completed_at: DateTime<Utc>,
}

impl NewWorkoutLog {
  /// The log as it will look once stored, with placeholder ids
  pub fn to_unsaved_log(&self) -> WorkoutLog {
    WorkoutLog {
      id: 0,
      date: self.date,
      started_at: self.started_at,
      duration_seconds: self.duration_seconds,
      notes: self.notes.clone(),
      intensity_rating: self.intensity_rating,
      calories_burned: self.calories_burned,
      sets: self
        .sets
        .iter()
        .map(|s| PerformedSet {
          id: 0,
          log_id: 0,
          exercise_id: s.exercise_id,
          set_number: s.set_number,
          reps: s.reps,
          weight_kg: s.weight_kg,
          rest_seconds: s.rest_seconds,
          completed_at: s.completed_at,
        })
        .collect(),
    }
  }
}
