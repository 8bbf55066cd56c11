use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ExerciseId, PlanId};

/// Planned vs. performed comparison for one date of one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
  pub date: NaiveDate,
  pub plan_id: PlanId,
  /// 0 when the date precedes the plan
  pub day_number: u32,
  pub completed_exercise_ids: BTreeSet<ExerciseId>,
  pub missed_exercise_ids: BTreeSet<ExerciseId>,
  /// Exact ratio in [0.0, 1.0]; round only for display
  pub completion_percentage: f64,
}

impl CompletionRecord {
  /// A record with no exercise breakdown (unscheduled, rest or empty days)
  pub fn flat(date: NaiveDate, plan_id: PlanId, day_number: u32, completion_percentage: f64) -> Self {
    Self {
      date,
      plan_id,
      day_number,
      completed_exercise_ids: BTreeSet::new(),
      missed_exercise_ids: BTreeSet::new(),
      completion_percentage,
    }
  }

  /// Whole-number percentage for display (truncated, so 2/3 shows as 66)
  pub fn display_percent(&self) -> u32 {
    (self.completion_percentage * 100.0) as u32
  }
}
