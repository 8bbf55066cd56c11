use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ExerciseId, PlanId, TemplateId};

/// A repeating N-day training plan, loaded as a snapshot with its templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
  pub id: PlanId,
  pub name: String,
  pub cycle_days: u32,
  pub start_date: NaiveDate,
  pub is_active: bool,
  /// Sorted by day_number; positions without a template are simply absent
  pub day_templates: Vec<DayTemplate>,
}

impl TrainingPlan {
  /// Template scheduled at a cycle position, if any
  pub fn template(&self, day_number: u32) -> Option<&DayTemplate> {
    self.day_templates.iter().find(|t| t.day_number == day_number)
  }

  /// The plan the calendar and today views follow
  pub fn active(plans: &[TrainingPlan]) -> Option<&TrainingPlan> {
    plans.iter().find(|p| p.is_active)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTemplate {
  pub id: TemplateId,
  pub plan_id: PlanId,
  pub day_number: u32,
  pub name: Option<String>,
  pub is_rest_day: bool,
  /// Sorted by `order`
  pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExercise {
  pub id: i64,
  pub template_id: TemplateId,
  pub exercise_id: ExerciseId,
  pub order: u32,
  pub target_sets: u32,
  pub target_reps: u32,
  pub rest_seconds: u32,
}

/// For creating a plan together with its templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrainingPlan {
  pub name: String,
  pub cycle_days: u32,
  pub start_date: NaiveDate,
  pub is_active: bool,
  pub day_templates: Vec<NewDayTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDayTemplate {
  pub day_number: u32,
  pub name: Option<String>,
  pub is_rest_day: bool,
  pub exercises: Vec<NewPlannedExercise>,
}

impl NewDayTemplate {
  pub fn rest(day_number: u32) -> Self {
    Self {
      day_number,
      name: None,
      is_rest_day: true,
      exercises: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlannedExercise {
  pub exercise_id: ExerciseId,
  pub order: u32,
  #[serde(default = "default_target_sets")]
  pub target_sets: u32,
  #[serde(default = "default_target_reps")]
  pub target_reps: u32,
  #[serde(default = "default_rest_seconds")]
  pub rest_seconds: u32,
}

impl NewPlannedExercise {
  pub fn new(exercise_id: ExerciseId, order: u32) -> Self {
    Self {
      exercise_id,
      order,
      target_sets: default_target_sets(),
      target_reps: default_target_reps(),
      rest_seconds: default_rest_seconds(),
    }
  }
}

fn default_target_sets() -> u32 {
  3
}

fn default_target_reps() -> u32 {
  10
}

fn default_rest_seconds() -> u32 {
  90
}
