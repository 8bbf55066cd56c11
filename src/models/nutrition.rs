use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{NutritionPlanId, PlanId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlan {
  pub id: NutritionPlanId,
  pub name: String,
  pub daily_calorie_target: f64,
  pub protein_target_g: Option<f64>,
  pub carbs_target_g: Option<f64>,
  pub fat_target_g: Option<f64>,
  pub start_date: NaiveDate,
  pub is_active: bool,
  pub linked_training_plan_id: Option<PlanId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
  Breakfast,
  Lunch,
  Dinner,
  Snack,
}

impl std::fmt::Display for MealType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Breakfast => write!(f, "breakfast"),
      Self::Lunch => write!(f, "lunch"),
      Self::Dinner => write!(f, "dinner"),
      Self::Snack => write!(f, "snack"),
    }
  }
}

impl std::str::FromStr for MealType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "breakfast" => Ok(Self::Breakfast),
      "lunch" => Ok(Self::Lunch),
      "dinner" => Ok(Self::Dinner),
      "snack" => Ok(Self::Snack),
      _ => Err(format!("Unknown meal type: {}", s)),
    }
  }
}

/// Everything eaten on one date under one nutrition plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMealRecord {
  pub id: i64,
  pub nutrition_plan_id: NutritionPlanId,
  pub date: NaiveDate,
  pub notes: Option<String>,
  pub meals: Vec<Meal>,
}

impl DailyMealRecord {
  pub fn total_calories(&self) -> f64 {
    self.meals.iter().map(Meal::total_calories).sum()
  }

  pub fn total_protein(&self) -> f64 {
    self.meals.iter().map(Meal::total_protein).sum()
  }

  pub fn total_carbs(&self) -> f64 {
    self.meals.iter().map(Meal::total_carbs).sum()
  }

  pub fn total_fat(&self) -> f64 {
    self.meals.iter().map(Meal::total_fat).sum()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
  pub id: i64,
  pub record_id: i64,
  pub meal_type: MealType,
  pub eaten_at: DateTime<Utc>,
  pub food_items: Vec<FoodItem>,
}

impl Meal {
  pub fn total_calories(&self) -> f64 {
    self.food_items.iter().map(|f| f.calories).sum()
  }

  // Missing macros count as zero
  pub fn total_protein(&self) -> f64 {
    self.food_items.iter().filter_map(|f| f.protein_g).sum()
  }

  pub fn total_carbs(&self) -> f64 {
    self.food_items.iter().filter_map(|f| f.carbs_g).sum()
  }

  pub fn total_fat(&self) -> f64 {
    self.food_items.iter().filter_map(|f| f.fat_g).sum()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
  pub id: i64,
  pub meal_id: i64,
  pub name: String,
  pub calories: f64,
  pub serving_size: Option<String>,
  pub protein_g: Option<f64>,
  pub carbs_g: Option<f64>,
  pub fat_g: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodItem {
  pub name: String,
  pub calories: f64,
  pub serving_size: Option<String>,
  pub protein_g: Option<f64>,
  pub carbs_g: Option<f64>,
  pub fat_g: Option<f64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(calories: f64, protein: Option<f64>) -> FoodItem {
    FoodItem {
      id: 0,
      meal_id: 0,
      name: "item".to_string(),
      calories,
      serving_size: None,
      protein_g: protein,
      carbs_g: None,
      fat_g: Some(1.0),
    }
  }

  #[test]
  fn test_record_totals_sum_meals() {
    let record = DailyMealRecord {
      id: 1,
      nutrition_plan_id: 1,
      date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
      notes: None,
      meals: vec![
        Meal {
          id: 1,
          record_id: 1,
          meal_type: MealType::Breakfast,
          eaten_at: Utc::now(),
          food_items: vec![item(155.0, Some(13.0)), item(61.0, None)],
        },
        Meal {
          id: 2,
          record_id: 1,
          meal_type: MealType::Lunch,
          eaten_at: Utc::now(),
          food_items: vec![item(165.0, Some(31.0))],
        },
      ],
    };

    assert_eq!(record.total_calories(), 381.0);
    assert_eq!(record.total_protein(), 44.0);
    assert_eq!(record.total_carbs(), 0.0);
    assert_eq!(record.total_fat(), 3.0);
  }
}
