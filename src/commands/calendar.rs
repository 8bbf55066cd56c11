//! Monthly calendar command

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::{classify_status, leading_padding, month_days, CalendarDayStatus, StatusColor};
use crate::completion::evaluate_completion;
use crate::db::AppState;
use crate::error::{AppError, AppResult};
use crate::models::WorkoutLog;
use crate::schedule::cycle_day;
use crate::store;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: CalendarDayStatus,
    pub color: StatusColor,
    pub cycle_day: u32,
    pub has_workout: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid
    pub leading_padding: u32,
    pub days: Vec<CalendarDay>,
}

/// Status of every day in a month under the active plan.
///
/// Completion is recomputed from the stored logs rather than read back from
/// cached records, so edits to a plan or a log show up immediately.
pub async fn calendar_month(state: &AppState, year: i32, month: u32) -> AppResult<CalendarMonth> {
    let days = month_days(year, month);
    let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
        return Err(AppError::Invalid(format!("no such month: {}-{}", year, month)));
    };

    let today = state.zone.today();
    let plan = store::plans::load_active_plan(&state.db).await?;
    let logs = store::workouts::load_workouts_between(&state.db, first, last).await?;

    // Logs arrive oldest first; the last one per day wins
    let mut latest_logs: BTreeMap<NaiveDate, &WorkoutLog> = BTreeMap::new();
    for log in &logs {
        latest_logs.insert(log.date, log);
    }

    let days = days
        .into_iter()
        .map(|date| {
            let log = latest_logs.get(&date).copied();
            let completion = match (&plan, log) {
                (Some(plan), Some(log)) if date <= today => Some(evaluate_completion(date, plan, Some(log))),
                _ => None,
            };
            let status = classify_status(date, today, plan.as_ref(), completion.as_ref());

            CalendarDay {
                date,
                status,
                color: status.color(),
                cycle_day: plan.as_ref().map(|p| cycle_day(date, p)).unwrap_or(0),
                has_workout: log.is_some(),
            }
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        leading_padding: leading_padding(first),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::training::{create_training_plan, log_workout};
    use crate::test_utils::{mock_new_plan, mock_new_workout, seed_test_exercises, setup_test_state, test_start_date};
    use chrono::{Duration, NaiveTime};

    #[tokio::test]
    async fn test_month_without_plan_is_all_future() {
        let state = setup_test_state().await;
        let month = calendar_month(&state, 2026, 1).await.unwrap();

        assert_eq!(month.days.len(), 31);
        assert_eq!(month.leading_padding, 4);
        assert!(month.days.iter().all(|d| d.status == CalendarDayStatus::Future));
    }

    #[tokio::test]
    async fn test_month_statuses() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();

        let start = test_start_date();
        // Day 1 fully done, day 4 (cycle day 1) partly done, day 5 (cycle day 2) skipped
        log_workout(&state, mock_new_workout(start, &ids[..3])).await.unwrap();
        log_workout(&state, mock_new_workout(start + Duration::days(3), &ids[..1])).await.unwrap();

        let month = calendar_month(&state, 2026, 1).await.unwrap();
        let status_on = |day: u32| month.days[(day - 1) as usize].status;

        assert_eq!(status_on(4), CalendarDayStatus::Future);
        assert_eq!(status_on(5), CalendarDayStatus::CompletedFull);
        assert_eq!(status_on(6), CalendarDayStatus::Missed);
        assert_eq!(status_on(7), CalendarDayStatus::RestDay);
        assert_eq!(status_on(8), CalendarDayStatus::CompletedPartial { percentage: 1.0 / 3.0 });
        assert_eq!(month.days[7].color, StatusColor::Orange);
        assert!(month.days[7].has_workout);
        assert_eq!(month.days[7].cycle_day, 1);
        assert_eq!(month.days[3].cycle_day, 0);
    }

    #[tokio::test]
    async fn test_month_uses_latest_log_of_day() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();

        let start = test_start_date();
        let mut morning = mock_new_workout(start, &ids[..1]);
        morning.started_at = NaiveTime::from_hms_opt(7, 0, 0);
        let mut evening = mock_new_workout(start, &ids[..3]);
        evening.started_at = NaiveTime::from_hms_opt(19, 0, 0);
        log_workout(&state, evening).await.unwrap();
        log_workout(&state, morning).await.unwrap();

        let month = calendar_month(&state, 2026, 1).await.unwrap();
        assert_eq!(month.days[4].status, CalendarDayStatus::CompletedFull);
    }

    #[tokio::test]
    async fn test_invalid_month() {
        let state = setup_test_state().await;
        assert!(matches!(calendar_month(&state, 2026, 13).await, Err(AppError::Invalid(_))));
    }
}
