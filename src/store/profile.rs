//! User profile and body metric persistence

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{parse_date, parse_optional_date};
use crate::error::{AppError, AppResult};
use crate::models::profile::week_start;
use crate::models::{BodyMetric, Gender, NewBodyMetric, UserProfile};

/// The single profile row, or an empty profile before the user fills one in
pub async fn get_profile(pool: &SqlitePool) -> AppResult<UserProfile> {
    let row = sqlx::query(
        r#"
        SELECT full_name, email, birthday, gender, height_cm, weight_kg
        FROM user_profile
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(UserProfile::default());
    };

    let gender: String = row.get("gender");
    Ok(UserProfile {
        full_name: row.get("full_name"),
        email: row.get("email"),
        birthday: parse_optional_date(row.get("birthday"))?,
        gender: gender.parse::<Gender>().map_err(AppError::Invalid)?,
        height_cm: row.get("height_cm"),
        weight_kg: row.get("weight_kg"),
    })
}

pub async fn upsert_profile(pool: &SqlitePool, profile: &UserProfile) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profile (id, full_name, email, birthday, gender, height_cm, weight_kg, updated_at)
        VALUES (1, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            full_name = excluded.full_name,
            email = excluded.email,
            birthday = excluded.birthday,
            gender = excluded.gender,
            height_cm = excluded.height_cm,
            weight_kg = excluded.weight_kg,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&profile.full_name)
    .bind(&profile.email)
    .bind(profile.birthday.map(|d| d.to_string()))
    .bind(profile.gender.to_string())
    .bind(profile.height_cm)
    .bind(profile.weight_kg)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    info!("Saved user profile");
    Ok(())
}

/// Record a measurement. Unless a later measurement exists, its weight and
/// height also become the profile's current values so calorie estimates
/// follow the latest weigh-in.
pub async fn insert_body_metric(pool: &SqlitePool, metric: &NewBodyMetric) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO body_metrics (date, week_start, weight_kg, height_cm, body_fat_percentage, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(metric.date.to_string())
    .bind(week_start(metric.date).to_string())
    .bind(metric.weight_kg)
    .bind(metric.height_cm)
    .bind(metric.body_fat_percentage)
    .bind(&metric.notes)
    .execute(pool)
    .await?
    .last_insert_rowid();

    let later: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM body_metrics WHERE date > ?")
        .bind(metric.date.to_string())
        .fetch_one(pool)
        .await?;

    if later == 0 && (metric.weight_kg.is_some() || metric.height_cm.is_some()) {
        let mut profile = get_profile(pool).await?;
        profile.weight_kg = metric.weight_kg.or(profile.weight_kg);
        profile.height_cm = metric.height_cm.or(profile.height_cm);
        upsert_profile(pool, &profile).await?;
    }

    debug!(id, date = %metric.date, "Recorded body metric");
    Ok(id)
}

/// Metrics dated within `start..=end`, oldest first
pub async fn list_body_metrics(pool: &SqlitePool, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<BodyMetric>> {
    let rows = sqlx::query(
        r#"
        SELECT id, date, week_start, weight_kg, height_cm, body_fat_percentage, notes
        FROM body_metrics
        WHERE date >= ? AND date <= ?
        ORDER BY date, id
        "#,
    )
    .bind(start.to_string())
    .bind(end.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let date: String = row.get("date");
            let week: String = row.get("week_start");
            Ok(BodyMetric {
                id: row.get("id"),
                date: parse_date(&date)?,
                week_start: parse_date(&week)?,
                weight_kg: row.get("weight_kg"),
                height_cm: row.get("height_cm"),
                body_fat_percentage: row.get("body_fat_percentage"),
                notes: row.get("notes"),
            })
        })
        .collect()
}

/// Every metric up to and including `end`, oldest first
pub async fn list_body_metrics_through(pool: &SqlitePool, end: NaiveDate) -> AppResult<Vec<BodyMetric>> {
    let first: Option<String> = sqlx::query_scalar("SELECT MIN(date) FROM body_metrics")
        .fetch_one(pool)
        .await?;

    match first {
        Some(first) => list_body_metrics(pool, parse_date(&first)?, end).await,
        None => Ok(Vec::new()),
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
