//! Workout log persistence

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{parse_date, parse_instant, parse_time};
use crate::error::{AppError, AppResult};
use crate::models::{NewWorkoutLog, PerformedSet, WorkoutLog, WorkoutLogId};

pub async fn insert_workout(pool: &SqlitePool, log: &NewWorkoutLog) -> AppResult<WorkoutLogId> {
    if let Some(rating) = log.intensity_rating {
        if !(1..=10).contains(&rating) {
            return Err(AppError::Invalid(format!("intensity rating {} is outside 1-10", rating)));
        }
    }

    let mut tx = pool.begin().await?;

    let log_id = sqlx::query(
        r#"
        INSERT INTO workout_logs (
            date, started_at, duration_seconds, notes,
            intensity_rating, calories_burned
        )
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(log.date.to_string())
    .bind(log.started_at.map(|t| t.format("%H:%M:%S").to_string()))
    .bind(log.duration_seconds)
    .bind(&log.notes)
    .bind(log.intensity_rating.map(i64::from))
    .bind(log.calories_burned)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for set in &log.sets {
        sqlx::query(
            r#"
            INSERT INTO workout_sets (
                log_id, exercise_id, set_number, reps,
                weight_kg, rest_seconds, completed_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log_id)
        .bind(set.exercise_id)
        .bind(i64::from(set.set_number))
        .bind(i64::from(set.reps))
        .bind(set.weight_kg)
        .bind(set.rest_seconds.map(i64::from))
        .bind(set.completed_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(log_id, date = %log.date, sets = log.sets.len(), "Logged workout");
    Ok(log_id)
}

async fn load_sets(pool: &SqlitePool, log_ids: &[WorkoutLogId]) -> AppResult<Vec<PerformedSet>> {
    if log_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; log_ids.len()].join(", ");
    let sql = format!(
        r#"
        SELECT id, log_id, exercise_id, set_number, reps, weight_kg, rest_seconds, completed_at
        FROM workout_sets
        WHERE log_id IN ({})
        ORDER BY log_id, set_number, id
        "#,
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for id in log_ids {
        query = query.bind(*id);
    }
    let rows = query.fetch_all(pool).await?;

    rows.iter()
        .map(|row| {
            let completed_at: String = row.get("completed_at");
            Ok(PerformedSet {
                id: row.get("id"),
                log_id: row.get("log_id"),
                exercise_id: row.get("exercise_id"),
                set_number: row.get::<i64, _>("set_number") as u32,
                reps: row.get::<i64, _>("reps") as u32,
                weight_kg: row.get("weight_kg"),
                rest_seconds: row.get::<Option<i64>, _>("rest_seconds").map(|v| v as u32),
                completed_at: parse_instant(&completed_at)?,
            })
        })
        .collect()
}

/// Turn log rows into logs, attaching their sets
async fn logs_from_rows(pool: &SqlitePool, rows: Vec<sqlx::sqlite::SqliteRow>) -> AppResult<Vec<WorkoutLog>> {
    let mut logs = Vec::with_capacity(rows.len());
    for row in &rows {
        let date: String = row.get("date");
        let started_at: Option<String> = row.get("started_at");
        logs.push(WorkoutLog {
            id: row.get("id"),
            date: parse_date(&date)?,
            started_at: started_at.as_deref().map(parse_time).transpose()?,
            duration_seconds: row.get("duration_seconds"),
            notes: row.get("notes"),
            intensity_rating: row.get::<Option<i64>, _>("intensity_rating").map(|v| v as u8),
            calories_burned: row.get("calories_burned"),
            sets: Vec::new(),
        });
    }

    let ids: Vec<WorkoutLogId> = logs.iter().map(|l| l.id).collect();
    let mut sets = load_sets(pool, &ids).await?;
    for log in &mut logs {
        let (mine, rest): (Vec<PerformedSet>, Vec<PerformedSet>) = sets.into_iter().partition(|s| s.log_id == log.id);
        log.sets = mine;
        sets = rest;
    }

    Ok(logs)
}

pub async fn load_workout(pool: &SqlitePool, log_id: WorkoutLogId) -> AppResult<WorkoutLog> {
    let rows = sqlx::query(
        r#"
        SELECT id, date, started_at, duration_seconds, notes, intensity_rating, calories_burned
        FROM workout_logs
        WHERE id = ?
        "#,
    )
    .bind(log_id)
    .fetch_all(pool)
    .await?;

    logs_from_rows(pool, rows)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Workout log {}", log_id)))
}

/// Logs dated within `start..=end`, oldest first. Untimed logs sort ahead of
/// timed ones on the same day.
pub async fn load_workouts_between(pool: &SqlitePool, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<WorkoutLog>> {
    let rows = sqlx::query(
        r#"
        SELECT id, date, started_at, duration_seconds, notes, intensity_rating, calories_burned
        FROM workout_logs
        WHERE date >= ? AND date <= ?
        ORDER BY date, started_at, id
        "#,
    )
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    let logs = logs_from_rows(pool, rows).await?;
    debug!(%start, %end, count = logs.len(), "Loaded workout logs");
    Ok(logs)
}

pub async fn load_workouts_on(pool: &SqlitePool, date: NaiveDate) -> AppResult<Vec<WorkoutLog>> {
    load_workouts_between(pool, date, date).await
}

/// Most recent log of a day, the one completion is evaluated against
pub async fn latest_workout_on(pool: &SqlitePool, date: NaiveDate) -> AppResult<Option<WorkoutLog>> {
    Ok(load_workouts_on(pool, date).await?.pop())
}

pub async fn delete_workout(pool: &SqlitePool, log_id: WorkoutLogId) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM workout_logs WHERE id = ?")
        .bind(log_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Workout log {}", log_id)));
    }
    Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
