//! Nutrition target and meal commands

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calories::{ActivityLevel, FitnessGoal, NutritionTargets};
use crate::db::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{find_preset_foods, preset_food_named, FoodCategory, MealType, NewFoodItem, NutritionPlan, PresetFood};
use crate::store;

/// Targets for the saved profile as of today; None while the profile lacks
/// weight, height or birthday
pub async fn nutrition_targets(
    state: &AppState,
    activity_level: ActivityLevel,
    goal: FitnessGoal,
) -> AppResult<Option<NutritionTargets>> {
    let profile = store::profile::get_profile(&state.db).await?;
    Ok(NutritionTargets::derive(&profile, state.zone.today(), activity_level, goal))
}

/// Create and activate a nutrition plan from the profile's targets
pub async fn create_nutrition_plan_from_profile(
    state: &AppState,
    name: &str,
    activity_level: ActivityLevel,
    goal: FitnessGoal,
) -> AppResult<NutritionPlan> {
    let targets = nutrition_targets(state, activity_level, goal)
        .await?
        .ok_or_else(|| AppError::Invalid("profile needs weight, height and birthday".into()))?;

    let mut plan = NutritionPlan::from_targets(name, &targets, state.zone.today());
    plan.linked_training_plan_id = store::plans::load_active_plan(&state.db).await?.map(|p| p.id);
    plan.id = store::nutrition::create_nutrition_plan(&state.db, &plan).await?;

    info!(id = plan.id, calories = plan.daily_calorie_target, "Created nutrition plan from profile");
    Ok(plan)
}

/// Add a meal eaten now to today's record of the active nutrition plan
pub async fn log_meal(state: &AppState, meal_type: MealType, food_items: Vec<NewFoodItem>) -> AppResult<i64> {
    let plan = store::nutrition::load_active_nutrition_plan(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Active nutrition plan".into()))?;

    let eaten_at = Utc::now();
    store::nutrition::add_meal(&state.db, plan.id, state.zone.day_of(eaten_at), meal_type, eaten_at, &food_items).await
}

/// Built-in foods for quick selection, narrowed by category and name
pub fn preset_foods(category: Option<FoodCategory>, query: &str) -> Vec<PresetFood> {
    find_preset_foods(category, query)
}

/// Add a meal of one serving of each named preset food, named in the
/// display language
pub async fn log_preset_meal(state: &AppState, meal_type: MealType, food_names: &[&str]) -> AppResult<i64> {
    let language = super::preferences::get_preferences(state).await?.language;
    let food_items = food_names
        .iter()
        .map(|name| {
            preset_food_named(name)
                .map(|food| food.to_food_item(language))
                .ok_or_else(|| AppError::NotFound(format!("Preset food {}", name)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    log_meal(state, meal_type, food_items).await
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionProgress {
    pub date: NaiveDate,
    pub plan: NutritionPlan,
    pub calories_eaten: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub completion_rate: f64,
    pub deviation_percentage: f64,
}

/// Intake on `date` against the active nutrition plan, None without one
pub async fn nutrition_progress(state: &AppState, date: NaiveDate) -> AppResult<Option<NutritionProgress>> {
    let Some(plan) = store::nutrition::load_active_nutrition_plan(&state.db).await? else {
        return Ok(None);
    };

    let records = store::nutrition::load_meal_records(&state.db, plan.id, date, date).await?;
    let record = plan.record_for(&records, date);

    Ok(Some(NutritionProgress {
        date,
        calories_eaten: record.map(|r| r.total_calories()).unwrap_or(0.0),
        protein_g: record.map(|r| r.total_protein()).unwrap_or(0.0),
        carbs_g: record.map(|r| r.total_carbs()).unwrap_or(0.0),
        fat_g: record.map(|r| r.total_fat()).unwrap_or(0.0),
        completion_rate: plan.completion_rate(&records, date),
        deviation_percentage: plan.deviation_percentage(&records, date),
        plan,
    }))
}
