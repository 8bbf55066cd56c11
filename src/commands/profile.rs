//! Profile and body metric commands

use chrono::NaiveDate;

use crate::db::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{BodyMetric, NewBodyMetric, UserProfile};
use crate::store;

pub async fn get_profile(state: &AppState) -> AppResult<UserProfile> {
    store::profile::get_profile(&state.db).await
}

pub async fn update_profile(state: &AppState, profile: UserProfile) -> AppResult<UserProfile> {
    if profile.weight_kg.is_some_and(|w| w <= 0.0) || profile.height_cm.is_some_and(|h| h <= 0.0) {
        return Err(AppError::Invalid("weight and height must be positive".into()));
    }
    store::profile::upsert_profile(&state.db, &profile).await?;
    Ok(profile)
}

pub async fn record_body_metric(state: &AppState, metric: NewBodyMetric) -> AppResult<i64> {
    store::profile::insert_body_metric(&state.db, &metric).await
}

pub async fn body_metrics_between(state: &AppState, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<BodyMetric>> {
    store::profile::list_body_metrics(&state.db, start, end).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_profile, setup_test_state};

    #[tokio::test]
    async fn test_update_and_reload_profile() {
        let state = setup_test_state().await;
        update_profile(&state, mock_profile()).await.unwrap();
        assert_eq!(get_profile(&state).await.unwrap().height_cm, Some(175.0));
    }

    #[tokio::test]
    async fn test_non_positive_weight_rejected() {
        let state = setup_test_state().await;
        let profile = UserProfile {
            weight_kg: Some(0.0),
            ..mock_profile()
        };
        assert!(matches!(update_profile(&state, profile).await, Err(AppError::Invalid(_))));
    }
    #[tokio::test]
    async fn test_record_and_list_body_metrics() {
        let state = setup_test_state().await;
        update_profile(&state, mock_profile()).await.unwrap();
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();

        for (date, weight_kg) in [(day(5), 70.0), (day(12), 69.4), (day(20), 68.9)] {
            let metric = NewBodyMetric {
                date,
                weight_kg: Some(weight_kg),
                height_cm: None,
                body_fat_percentage: None,
                notes: None,
            };
            record_body_metric(&state, metric).await.unwrap();
        }

        let metrics = body_metrics_between(&state, day(6), day(20)).await.unwrap();
        let weights: Vec<Option<f64>> = metrics.iter().map(|m| m.weight_kg).collect();
        assert_eq!(weights, vec![Some(69.4), Some(68.9)]);
        assert_eq!(metrics[0].week_start, day(12));

        assert_eq!(get_profile(&state).await.unwrap().weight_kg, Some(68.9));
    }
}
