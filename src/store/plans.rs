//! Training plan persistence
//!
//! Plans are written together with their day templates and planned exercises
//! in one transaction and always loaded back as a complete snapshot.

use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::parse_date;
use crate::error::{AppError, AppResult};
use crate::models::{DayTemplate, NewTrainingPlan, PlanId, PlannedExercise, TrainingPlan};

/// Reject plans the cycle calculator cannot work with
pub fn validate_plan(plan: &NewTrainingPlan) -> AppResult<()> {
    if plan.name.trim().is_empty() {
        return Err(AppError::Invalid("plan name must not be empty".into()));
    }
    if plan.cycle_days < 1 {
        return Err(AppError::Invalid(format!(
            "cycle_days must be at least 1, got {}",
            plan.cycle_days
        )));
    }

    let mut seen = BTreeSet::new();
    for template in &plan.day_templates {
        if template.day_number < 1 || template.day_number > plan.cycle_days {
            return Err(AppError::Invalid(format!(
                "day {} is outside the {}-day cycle",
                template.day_number, plan.cycle_days
            )));
        }
        if !seen.insert(template.day_number) {
            return Err(AppError::Invalid(format!(
                "day {} has more than one template",
                template.day_number
            )));
        }
    }

    Ok(())
}

pub async fn create_plan(pool: &SqlitePool, plan: &NewTrainingPlan) -> AppResult<PlanId> {
    validate_plan(plan)?;

    let mut tx = pool.begin().await?;

    if plan.is_active {
        sqlx::query("UPDATE training_plans SET is_active = 0")
            .execute(&mut *tx)
            .await?;
    }

    let plan_id = sqlx::query(
        r#"
        INSERT INTO training_plans (name, cycle_days, start_date, is_active)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&plan.name)
    .bind(i64::from(plan.cycle_days))
    .bind(plan.start_date.to_string())
    .bind(plan.is_active)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for template in &plan.day_templates {
        let template_id = sqlx::query(
            r#"
            INSERT INTO day_templates (plan_id, day_number, name, is_rest_day)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(plan_id)
        .bind(i64::from(template.day_number))
        .bind(&template.name)
        .bind(template.is_rest_day)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for exercise in &template.exercises {
            sqlx::query(
                r#"
                INSERT INTO plan_exercises (
                    template_id, exercise_id, sort_order,
                    target_sets, target_reps, rest_seconds
                )
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(template_id)
            .bind(exercise.exercise_id)
            .bind(i64::from(exercise.order))
            .bind(i64::from(exercise.target_sets))
            .bind(i64::from(exercise.target_reps))
            .bind(i64::from(exercise.rest_seconds))
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    info!(plan_id, name = %plan.name, cycle_days = plan.cycle_days, "Created training plan");
    Ok(plan_id)
}

async fn load_templates(pool: &SqlitePool, plan_id: PlanId) -> AppResult<Vec<DayTemplate>> {
    let template_rows = sqlx::query(
        r#"
        SELECT id, plan_id, day_number, name, is_rest_day
        FROM day_templates
        WHERE plan_id = ?
        ORDER BY day_number
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    let exercise_rows = sqlx::query(
        r#"
        SELECT
            pe.id, pe.template_id, pe.exercise_id, pe.sort_order,
            pe.target_sets, pe.target_reps, pe.rest_seconds
        FROM plan_exercises pe
        JOIN day_templates dt ON dt.id = pe.template_id
        WHERE dt.plan_id = ?
        ORDER BY pe.template_id, pe.sort_order, pe.id
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    let planned: Vec<PlannedExercise> = exercise_rows
        .iter()
        .map(|row| PlannedExercise {
            id: row.get("id"),
            template_id: row.get("template_id"),
            exercise_id: row.get("exercise_id"),
            order: row.get::<i64, _>("sort_order") as u32,
            target_sets: row.get::<i64, _>("target_sets") as u32,
            target_reps: row.get::<i64, _>("target_reps") as u32,
            rest_seconds: row.get::<i64, _>("rest_seconds") as u32,
        })
        .collect();

    let templates = template_rows
        .iter()
        .map(|row| {
            let id: i64 = row.get("id");
            DayTemplate {
                id,
                plan_id: row.get("plan_id"),
                day_number: row.get::<i64, _>("day_number") as u32,
                name: row.get("name"),
                is_rest_day: row.get("is_rest_day"),
                exercises: planned.iter().filter(|p| p.template_id == id).cloned().collect(),
            }
        })
        .collect();

    Ok(templates)
}

fn plan_from_row(row: &sqlx::sqlite::SqliteRow, day_templates: Vec<DayTemplate>) -> AppResult<TrainingPlan> {
    let start_date: String = row.get("start_date");
    Ok(TrainingPlan {
        id: row.get("id"),
        name: row.get("name"),
        cycle_days: row.get::<i64, _>("cycle_days") as u32,
        start_date: parse_date(&start_date)?,
        is_active: row.get("is_active"),
        day_templates,
    })
}

/// Load one plan with its templates and planned exercises
pub async fn load_plan(pool: &SqlitePool, plan_id: PlanId) -> AppResult<TrainingPlan> {
    let row = sqlx::query(
        r#"
        SELECT id, name, cycle_days, start_date, is_active
        FROM training_plans
        WHERE id = ?
        "#,
    )
    .bind(plan_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Training plan {}", plan_id)))?;

    let templates = load_templates(pool, plan_id).await?;
    plan_from_row(&row, templates)
}

/// Load every plan, oldest first
pub async fn load_all_plans(pool: &SqlitePool) -> AppResult<Vec<TrainingPlan>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, cycle_days, start_date, is_active
        FROM training_plans
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut plans = Vec::with_capacity(rows.len());
    for row in &rows {
        let templates = load_templates(pool, row.get("id")).await?;
        plans.push(plan_from_row(row, templates)?);
    }

    Ok(plans)
}

/// The currently active plan, if any
pub async fn load_active_plan(pool: &SqlitePool) -> AppResult<Option<TrainingPlan>> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM training_plans WHERE is_active = 1 ORDER BY id LIMIT 1")
        .fetch_optional(pool)
        .await?;

    match id {
        Some(id) => Ok(Some(load_plan(pool, id).await?)),
        None => Ok(None),
    }
}

/// Make one plan the active plan and deactivate every other
pub async fn activate_plan(pool: &SqlitePool, plan_id: PlanId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM training_plans WHERE id = ?")
        .bind(plan_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Training plan {}", plan_id)));
    }

    sqlx::query("UPDATE training_plans SET is_active = (id = ?)")
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!(plan_id, "Activated training plan");
    Ok(())
}

pub async fn delete_plan(pool: &SqlitePool, plan_id: PlanId) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM training_plans WHERE id = ?")
        .bind(plan_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Training plan {}", plan_id)));
    }

    info!(plan_id, "Deleted training plan");
    Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
