//! Nutrition plan adherence

use chrono::NaiveDate;

use crate::calories::NutritionTargets;
use crate::models::{DailyMealRecord, NutritionPlan};

impl NutritionPlan {
  /// This plan's meal record for `date`, if one was logged
  pub fn record_for<'a>(&self, records: &'a [DailyMealRecord], date: NaiveDate) -> Option<&'a DailyMealRecord> {
    records
      .iter()
      .find(|r| r.nutrition_plan_id == self.id && r.date == date)
  }

  /// Share of the calorie target eaten on `date`, capped at 1.0
  pub fn completion_rate(&self, records: &[DailyMealRecord], date: NaiveDate) -> f64 {
    let Some(record) = self.record_for(records, date) else {
      return 0.0;
    };
    if self.daily_calorie_target <= 0.0 {
      return 0.0;
    }
    (record.total_calories() / self.daily_calorie_target).min(1.0)
  }

  /// Distance from the calorie target on `date` as a percentage of the target.
  /// A day without a record counts as 100% off.
  pub fn deviation_percentage(&self, records: &[DailyMealRecord], date: NaiveDate) -> f64 {
    let Some(record) = self.record_for(records, date) else {
      return 100.0;
    };
    if self.daily_calorie_target <= 0.0 {
      return 100.0;
    }
    (record.total_calories() - self.daily_calorie_target).abs() / self.daily_calorie_target * 100.0
  }

  /// Unsaved plan carrying the calculator's calories and macros (id 0 until stored)
  pub fn from_targets(name: &str, targets: &NutritionTargets, start_date: NaiveDate) -> Self {
    Self {
      id: 0,
      name: name.to_string(),
      daily_calorie_target: targets.daily_calories,
      protein_target_g: Some(targets.macros.protein_g),
      carbs_target_g: Some(targets.macros.carbs_g),
      fat_target_g: Some(targets.macros.fat_g),
      start_date,
      is_active: true,
      linked_training_plan_id: None,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
