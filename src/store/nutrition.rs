//! Nutrition plan and meal persistence

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{parse_date, parse_instant};
use crate::error::{AppError, AppResult};
use crate::models::{DailyMealRecord, FoodItem, Meal, MealType, NewFoodItem, NutritionPlan, NutritionPlanId};

/// Store a plan (its `id` is ignored) and return the new id. An active plan
/// replaces whichever plan was active before.
pub async fn create_nutrition_plan(pool: &SqlitePool, plan: &NutritionPlan) -> AppResult<NutritionPlanId> {
    if plan.daily_calorie_target <= 0.0 {
        return Err(AppError::Invalid(format!(
            "daily calorie target must be positive, got {}",
            plan.daily_calorie_target
        )));
    }

    let mut tx = pool.begin().await?;

    if plan.is_active {
        sqlx::query("UPDATE nutrition_plans SET is_active = 0")
            .execute(&mut *tx)
            .await?;
    }

    let id = sqlx::query(
        r#"
        INSERT INTO nutrition_plans (
            name, daily_calorie_target, protein_target_g, carbs_target_g, fat_target_g,
            start_date, is_active, linked_training_plan_id
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&plan.name)
    .bind(plan.daily_calorie_target)
    .bind(plan.protein_target_g)
    .bind(plan.carbs_target_g)
    .bind(plan.fat_target_g)
    .bind(plan.start_date.to_string())
    .bind(plan.is_active)
    .bind(plan.linked_training_plan_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    info!(id, name = %plan.name, target = plan.daily_calorie_target, "Created nutrition plan");
    Ok(id)
}

fn plan_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<NutritionPlan> {
    let start_date: String = row.get("start_date");
    Ok(NutritionPlan {
        id: row.get("id"),
        name: row.get("name"),
        daily_calorie_target: row.get("daily_calorie_target"),
        protein_target_g: row.get("protein_target_g"),
        carbs_target_g: row.get("carbs_target_g"),
        fat_target_g: row.get("fat_target_g"),
        start_date: parse_date(&start_date)?,
        is_active: row.get("is_active"),
        linked_training_plan_id: row.get("linked_training_plan_id"),
    })
}

pub async fn list_nutrition_plans(pool: &SqlitePool) -> AppResult<Vec<NutritionPlan>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, daily_calorie_target, protein_target_g, carbs_target_g, fat_target_g,
               start_date, is_active, linked_training_plan_id
        FROM nutrition_plans
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(plan_from_row).collect()
}

pub async fn load_active_nutrition_plan(pool: &SqlitePool) -> AppResult<Option<NutritionPlan>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, daily_calorie_target, protein_target_g, carbs_target_g, fat_target_g,
               start_date, is_active, linked_training_plan_id
        FROM nutrition_plans
        WHERE is_active = 1
        ORDER BY id
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(plan_from_row).transpose()
}

/// Add a meal to the plan's record for `date`, creating the record if this
/// is the first meal of the day. Returns the meal id.
pub async fn add_meal(
    pool: &SqlitePool,
    plan_id: NutritionPlanId,
    date: NaiveDate,
    meal_type: MealType,
    eaten_at: DateTime<Utc>,
    food_items: &[NewFoodItem],
) -> AppResult<i64> {
    let mut tx = pool.begin().await?;

    let plan_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM nutrition_plans WHERE id = ?")
        .bind(plan_id)
        .fetch_optional(&mut *tx)
        .await?;
    if plan_exists.is_none() {
        return Err(AppError::NotFound(format!("Nutrition plan {}", plan_id)));
    }

    sqlx::query("INSERT OR IGNORE INTO daily_meal_records (nutrition_plan_id, date) VALUES (?, ?)")
        .bind(plan_id)
        .bind(date.to_string())
        .execute(&mut *tx)
        .await?;

    let record_id: i64 = sqlx::query_scalar("SELECT id FROM daily_meal_records WHERE nutrition_plan_id = ? AND date = ?")
        .bind(plan_id)
        .bind(date.to_string())
        .fetch_one(&mut *tx)
        .await?;

    let meal_id = sqlx::query("INSERT INTO meals (record_id, meal_type, eaten_at) VALUES (?, ?, ?)")
        .bind(record_id)
        .bind(meal_type.to_string())
        .bind(eaten_at.to_rfc3339())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for item in food_items {
        sqlx::query(
            r#"
            INSERT INTO food_items (meal_id, name, calories, serving_size, protein_g, carbs_g, fat_g)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(meal_id)
        .bind(&item.name)
        .bind(item.calories)
        .bind(&item.serving_size)
        .bind(item.protein_g)
        .bind(item.carbs_g)
        .bind(item.fat_g)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    debug!(plan_id, %date, meal_id, items = food_items.len(), "Added meal");
    Ok(meal_id)
}

/// One plan's daily records within `start..=end`, with meals and food items
pub async fn load_meal_records(
    pool: &SqlitePool,
    plan_id: NutritionPlanId,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<DailyMealRecord>> {
    let record_rows = sqlx::query(
        r#"
        SELECT id, nutrition_plan_id, date, notes
        FROM daily_meal_records
        WHERE nutrition_plan_id = ? AND date >= ? AND date <= ?
        ORDER BY date
        "#,
    )
    .bind(plan_id)
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    let meal_rows = sqlx::query(
        r#"
        SELECT m.id, m.record_id, m.meal_type, m.eaten_at
        FROM meals m
        JOIN daily_meal_records r ON r.id = m.record_id
        WHERE r.nutrition_plan_id = ? AND r.date >= ? AND r.date <= ?
        ORDER BY m.eaten_at, m.id
        "#,
    )
    .bind(plan_id)
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    let item_rows = sqlx::query(
        r#"
        SELECT f.id, f.meal_id, f.name, f.calories, f.serving_size, f.protein_g, f.carbs_g, f.fat_g
        FROM food_items f
        JOIN meals m ON m.id = f.meal_id
        JOIN daily_meal_records r ON r.id = m.record_id
        WHERE r.nutrition_plan_id = ? AND r.date >= ? AND r.date <= ?
        ORDER BY f.id
        "#,
    )
    .bind(plan_id)
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    let items: Vec<FoodItem> = item_rows
        .iter()
        .map(|row| FoodItem {
            id: row.get("id"),
            meal_id: row.get("meal_id"),
            name: row.get("name"),
            calories: row.get("calories"),
            serving_size: row.get("serving_size"),
            protein_g: row.get("protein_g"),
            carbs_g: row.get("carbs_g"),
            fat_g: row.get("fat_g"),
        })
        .collect();

    let mut meals = Vec::with_capacity(meal_rows.len());
    for row in &meal_rows {
        let id: i64 = row.get("id");
        let meal_type: String = row.get("meal_type");
        let eaten_at: String = row.get("eaten_at");
        meals.push(Meal {
            id,
            record_id: row.get("record_id"),
            meal_type: meal_type.parse::<MealType>().map_err(AppError::Invalid)?,
            eaten_at: parse_instant(&eaten_at)?,
            food_items: items.iter().filter(|f| f.meal_id == id).cloned().collect(),
        });
    }

    let mut records = Vec::with_capacity(record_rows.len());
    for row in &record_rows {
        let id: i64 = row.get("id");
        let date: String = row.get("date");
        records.push(DailyMealRecord {
            id,
            nutrition_plan_id: row.get("nutrition_plan_id"),
            date: parse_date(&date)?,
            notes: row.get("notes"),
            meals: meals.iter().filter(|m| m.record_id == id).cloned().collect(),
        });
    }

    Ok(records)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_food, mock_nutrition_plan, setup_test_db, teardown_test_db};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_meals_share_one_daily_record() {
        let pool = setup_test_db().await;
        let plan_id = create_nutrition_plan(&pool, &mock_nutrition_plan(2000.0)).await.unwrap();
        let date = d(2026, 1, 5);

        add_meal(&pool, plan_id, date, MealType::Breakfast, Utc::now(), &[mock_food("Oats", 350.0), mock_food("Egg", 78.0)])
            .await
            .expect("breakfast");
        add_meal(&pool, plan_id, date, MealType::Dinner, Utc::now(), &[mock_food("Salmon", 600.0)])
            .await
            .expect("dinner");
        add_meal(&pool, plan_id, d(2026, 1, 6), MealType::Lunch, Utc::now(), &[mock_food("Rice", 400.0)])
            .await
            .expect("next day");

        let records = load_meal_records(&pool, plan_id, date, date).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].meals.len(), 2);
        assert_eq!(records[0].total_calories(), 1028.0);

        let both = load_meal_records(&pool, plan_id, date, d(2026, 1, 6)).await.unwrap();
        assert_eq!(both.len(), 2);
        assert_eq!(both[1].total_calories(), 400.0);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_active_nutrition_plan_replaced() {
        let pool = setup_test_db().await;
        create_nutrition_plan(&pool, &mock_nutrition_plan(2000.0)).await.unwrap();
        let second = create_nutrition_plan(&pool, &mock_nutrition_plan(2400.0)).await.unwrap();

        let active = load_active_nutrition_plan(&pool).await.unwrap().unwrap();
        assert_eq!(active.id, second);
        assert_eq!(active.daily_calorie_target, 2400.0);
        assert_eq!(list_nutrition_plans(&pool).await.unwrap().len(), 2);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_meal_for_unknown_plan() {
        let pool = setup_test_db().await;
        let result = add_meal(&pool, 77, d(2026, 1, 5), MealType::Snack, Utc::now(), &[]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_non_positive_target_rejected() {
        let pool = setup_test_db().await;
        let result = create_nutrition_plan(&pool, &mock_nutrition_plan(0.0)).await;
        assert!(matches!(result, Err(AppError::Invalid(_))));
        teardown_test_db(pool).await;
    }
}
