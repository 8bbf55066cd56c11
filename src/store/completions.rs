//! Completion record persistence
//!
//! Rows here are a cache of `evaluate_completion`. Callers recompute from the
//! current plan and log and write the result back; a stored row is never used
//! as the source of truth.

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;
use tracing::debug;

use super::parse_date;
use crate::error::AppResult;
use crate::models::{CompletionRecord, ExerciseId, PlanId};

/// Insert or replace the record for its (date, plan)
pub async fn upsert_completion(pool: &SqlitePool, record: &CompletionRecord) -> AppResult<()> {
    let completed_json = serde_json::to_string(&record.completed_exercise_ids)?;
    let missed_json = serde_json::to_string(&record.missed_exercise_ids)?;

    sqlx::query(
        r#"
        INSERT INTO plan_completions (
            date, plan_id, day_number,
            completed_exercise_ids_json, missed_exercise_ids_json,
            completion_percentage, computed_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(date, plan_id) DO UPDATE SET
            day_number = excluded.day_number,
            completed_exercise_ids_json = excluded.completed_exercise_ids_json,
            missed_exercise_ids_json = excluded.missed_exercise_ids_json,
            completion_percentage = excluded.completion_percentage,
            computed_at = excluded.computed_at
        "#,
    )
    .bind(record.date.to_string())
    .bind(record.plan_id)
    .bind(i64::from(record.day_number))
    .bind(&completed_json)
    .bind(&missed_json)
    .bind(record.completion_percentage)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    debug!(
        date = %record.date,
        plan_id = record.plan_id,
        percentage = record.completion_percentage,
        "Stored completion record"
    );
    Ok(())
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<CompletionRecord> {
    let date: String = row.get("date");
    let completed_json: String = row.get("completed_exercise_ids_json");
    let missed_json: String = row.get("missed_exercise_ids_json");

    Ok(CompletionRecord {
        date: parse_date(&date)?,
        plan_id: row.get("plan_id"),
        day_number: row.get::<i64, _>("day_number") as u32,
        completed_exercise_ids: serde_json::from_str::<BTreeSet<ExerciseId>>(&completed_json)?,
        missed_exercise_ids: serde_json::from_str::<BTreeSet<ExerciseId>>(&missed_json)?,
        completion_percentage: row.get("completion_percentage"),
    })
}

pub async fn load_completion(pool: &SqlitePool, date: NaiveDate, plan_id: PlanId) -> AppResult<Option<CompletionRecord>> {
    let row = sqlx::query(
        r#"
        SELECT date, plan_id, day_number,
               completed_exercise_ids_json, missed_exercise_ids_json,
               completion_percentage
        FROM plan_completions
        WHERE date = ? AND plan_id = ?
        "#,
    )
    .bind(date.to_string())
    .bind(plan_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Stored records of one plan within `start..=end`, by date
pub async fn load_completions_between(
    pool: &SqlitePool,
    plan_id: PlanId,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<CompletionRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT date, plan_id, day_number,
               completed_exercise_ids_json, missed_exercise_ids_json,
               completion_percentage
        FROM plan_completions
        WHERE plan_id = ? AND date >= ? AND date <= ?
        ORDER BY date
        "#,
    )
    .bind(plan_id)
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
