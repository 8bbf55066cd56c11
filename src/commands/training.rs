//! Plan, workout and completion commands

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calories::strength_training_calories;
use crate::completion::evaluate_completion;
use crate::db::AppState;
use crate::error::AppResult;
use crate::models::{
    CompletionRecord, Exercise, ExerciseId, NewTrainingPlan, NewWorkoutLog, PlanId, TrainingPlan, WorkoutLog,
    WorkoutLogId,
};
use crate::schedule::{cycle_day, template_for_date};
use crate::store;

/// One planned exercise as the today screen lists it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayExercise {
    pub exercise_id: ExerciseId,
    pub name: String,
    pub target_sets: u32,
    pub target_reps: u32,
    pub rest_seconds: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTraining {
    pub date: NaiveDate,
    pub plan_id: Option<PlanId>,
    pub plan_name: Option<String>,
    /// 0 without a plan or before it starts
    pub cycle_day: u32,
    pub template_name: Option<String>,
    pub is_rest_day: bool,
    pub exercises: Vec<TodayExercise>,
    pub completion: Option<CompletionRecord>,
}

/// What the active plan schedules for `date`, with progress so far
pub async fn training_for_date(state: &AppState, date: NaiveDate) -> AppResult<DayTraining> {
    let Some(plan) = store::plans::load_active_plan(&state.db).await? else {
        return Ok(DayTraining {
            date,
            plan_id: None,
            plan_name: None,
            cycle_day: 0,
            template_name: None,
            is_rest_day: false,
            exercises: Vec::new(),
            completion: None,
        });
    };

    let log = store::workouts::latest_workout_on(&state.db, date).await?;
    let completion = (date >= plan.start_date).then(|| evaluate_completion(date, &plan, log.as_ref()));
    let language = super::preferences::get_preferences(state).await?.language;
    let catalog = store::exercises::list_exercises(&state.db).await?;

    let template = template_for_date(date, &plan);
    let exercises = template
        .map(|t| {
            t.exercises
                .iter()
                .map(|planned| TodayExercise {
                    exercise_id: planned.exercise_id,
                    name: catalog
                        .iter()
                        .find(|e| e.id == planned.exercise_id)
                        .map(|e| e.display_name(language).to_string())
                        .unwrap_or_default(),
                    target_sets: planned.target_sets,
                    target_reps: planned.target_reps,
                    rest_seconds: planned.rest_seconds,
                    completed: completion
                        .as_ref()
                        .is_some_and(|c| c.completed_exercise_ids.contains(&planned.exercise_id)),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(DayTraining {
        date,
        plan_id: Some(plan.id),
        plan_name: Some(plan.name.clone()),
        cycle_day: cycle_day(date, &plan),
        template_name: template.and_then(|t| t.name.clone()),
        is_rest_day: template.is_some_and(|t| t.is_rest_day),
        exercises,
        completion,
    })
}

pub async fn today_training(state: &AppState) -> AppResult<DayTraining> {
    training_for_date(state, state.zone.today()).await
}

/// Recompute completion for `date` against the active plan and store it.
///
/// None without an active plan or before the plan starts.
pub async fn evaluate_day(state: &AppState, date: NaiveDate) -> AppResult<Option<CompletionRecord>> {
    let Some(plan) = store::plans::load_active_plan(&state.db).await? else {
        return Ok(None);
    };
    if date < plan.start_date {
        return Ok(None);
    }

    let log = store::workouts::latest_workout_on(&state.db, date).await?;
    let record = evaluate_completion(date, &plan, log.as_ref());
    store::completions::upsert_completion(&state.db, &record).await?;

    debug!(%date, plan_id = plan.id, percentage = record.completion_percentage, "Evaluated day");
    Ok(Some(record))
}

/// Store a workout and refresh that day's completion.
///
/// Calories burned are estimated from the profile weight when the log does
/// not carry a value of its own.
pub async fn log_workout(state: &AppState, mut new_log: NewWorkoutLog) -> AppResult<WorkoutLog> {
    if new_log.calories_burned.is_none() {
        let profile = store::profile::get_profile(&state.db).await?;
        new_log.calories_burned = strength_training_calories(&new_log.to_unsaved_log(), profile.weight_kg);
    }

    let log_id = store::workouts::insert_workout(&state.db, &new_log).await?;
    evaluate_day(state, new_log.date).await?;

    store::workouts::load_workout(&state.db, log_id).await
}

pub async fn delete_workout(state: &AppState, log_id: WorkoutLogId) -> AppResult<()> {
    let log = store::workouts::load_workout(&state.db, log_id).await?;
    store::workouts::delete_workout(&state.db, log_id).await?;
    evaluate_day(state, log.date).await?;
    Ok(())
}

pub async fn workouts_between(state: &AppState, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<WorkoutLog>> {
    store::workouts::load_workouts_between(&state.db, start, end).await
}

pub async fn create_training_plan(state: &AppState, plan: NewTrainingPlan) -> AppResult<TrainingPlan> {
    let plan_id = store::plans::create_plan(&state.db, &plan).await?;
    store::plans::load_plan(&state.db, plan_id).await
}

pub async fn list_training_plans(state: &AppState) -> AppResult<Vec<TrainingPlan>> {
    store::plans::load_all_plans(&state.db).await
}

pub async fn activate_training_plan(state: &AppState, plan_id: PlanId) -> AppResult<()> {
    store::plans::activate_plan(&state.db, plan_id).await?;
    info!(plan_id, "Switched active training plan");
    Ok(())
}

pub async fn list_exercises(state: &AppState) -> AppResult<Vec<Exercise>> {
    store::exercises::list_exercises(&state.db).await
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::test_utils::{mock_new_plan, mock_new_workout, mock_profile, seed_test_exercises, setup_test_state, test_start_date};
    use chrono::{Duration, NaiveTime};

    #[tokio::test]
    async fn test_no_active_plan() {
        let state = setup_test_state().await;
        let day = training_for_date(&state, test_start_date()).await.unwrap();

        assert!(day.plan_id.is_none());
        assert_eq!(day.cycle_day, 0);
        assert!(day.exercises.is_empty());
        assert!(evaluate_day(&state, test_start_date()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_log_workout_updates_completion() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();
        let date = test_start_date();

        let before = training_for_date(&state, date).await.unwrap();
        assert_eq!(before.cycle_day, 1);
        assert_eq!(before.exercises.len(), 3);
        assert_eq!(before.exercises[0].name, "Barbell Squat");
        assert!(before.exercises.iter().all(|e| !e.completed));

        log_workout(&state, mock_new_workout(date, &[ids[0], ids[2], ids[3]])).await.unwrap();

        let after = training_for_date(&state, date).await.unwrap();
        let completed: Vec<bool> = after.exercises.iter().map(|e| e.completed).collect();
        assert_eq!(completed, vec![true, false, true]);

        let stored = store::completions::load_completion(&state.db, date, after.plan_id.unwrap())
            .await
            .unwrap()
            .expect("completion cached");
        assert_eq!(stored.completion_percentage, 2.0 / 3.0);
        assert_eq!(stored.display_percent(), 66);
    }

    #[tokio::test]
    async fn test_later_session_on_same_day_counts() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        let plan = create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();
        let date = test_start_date();

        let mut morning = mock_new_workout(date, &ids[..1]);
        morning.started_at = NaiveTime::from_hms_opt(7, 0, 0);
        log_workout(&state, morning).await.unwrap();

        let mut evening = mock_new_workout(date, &ids[..3]);
        evening.started_at = NaiveTime::from_hms_opt(19, 0, 0);
        log_workout(&state, evening).await.unwrap();

        let record = evaluate_day(&state, date).await.unwrap().unwrap();
        assert_eq!(record.completion_percentage, 1.0);

        let stored = store::completions::load_completion(&state.db, date, plan.id).await.unwrap().unwrap();
        assert_eq!(stored.completion_percentage, 1.0);

        let day = training_for_date(&state, date).await.unwrap();
        assert!(day.exercises.iter().all(|e| e.completed));
    }

    #[tokio::test]
    async fn test_rest_day_and_pre_start() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();

        let rest = training_for_date(&state, test_start_date() + Duration::days(2)).await.unwrap();
        assert!(rest.is_rest_day);
        assert_eq!(rest.completion.map(|c| c.completion_percentage), Some(1.0));

        let before = test_start_date() - Duration::days(1);
        assert!(training_for_date(&state, before).await.unwrap().completion.is_none());
        assert!(evaluate_day(&state, before).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_log_workout_estimates_calories() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        store::profile::upsert_profile(&state.db, &mock_profile()).await.unwrap();

        let mut new_log = mock_new_workout(test_start_date(), &[ids[0]]);
        new_log.intensity_rating = Some(5);
        let log = log_workout(&state, new_log).await.unwrap();

        // 3 sets x (45 + 90) s = 405 s at MET 5.0 and 70 kg
        let expected = 5.0 * 70.0 * (405.0 / 3600.0);
        crate::assert_approx_eq!(log.calories_burned.unwrap(), expected, 1e-9);
    }

    #[tokio::test]
    async fn test_logged_calories_kept_and_unknown_weight() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;

        let mut explicit = mock_new_workout(test_start_date(), &[ids[0]]);
        explicit.calories_burned = Some(321.0);
        assert_eq!(log_workout(&state, explicit).await.unwrap().calories_burned, Some(321.0));

        store::profile::upsert_profile(&state.db, &UserProfile::default()).await.unwrap();
        let unknown = mock_new_workout(test_start_date(), &[ids[1]]);
        assert_eq!(log_workout(&state, unknown).await.unwrap().calories_burned, None);
    }

    #[tokio::test]
    async fn test_delete_workout_reevaluates() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        let plan = create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();
        let date = test_start_date();

        let log = log_workout(&state, mock_new_workout(date, &ids[..3])).await.unwrap();
        delete_workout(&state, log.id).await.unwrap();

        let stored = store::completions::load_completion(&state.db, date, plan.id).await.unwrap().unwrap();
        assert_eq!(stored.completion_percentage, 0.0);
        assert_eq!(stored.missed_exercise_ids.len(), 3);
    }
    #[tokio::test]
    async fn test_switch_active_plan() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        let first = create_training_plan(&state, mock_new_plan(&ids)).await.unwrap();
        let second = create_training_plan(
            &state,
            NewTrainingPlan {
                name: "Upper Lower".to_string(),
                is_active: false,
                ..mock_new_plan(&ids)
            },
        )
        .await
        .unwrap();

        let plans = list_training_plans(&state).await.unwrap();
        let active: Vec<PlanId> = plans.iter().filter(|p| p.is_active).map(|p| p.id).collect();
        assert_eq!(plans.len(), 2);
        assert_eq!(active, vec![first.id]);

        activate_training_plan(&state, second.id).await.unwrap();
        let day = training_for_date(&state, test_start_date()).await.unwrap();
        assert_eq!(day.plan_id, Some(second.id));
        assert_eq!(day.plan_name.as_deref(), Some("Upper Lower"));

        let active: Vec<PlanId> = list_training_plans(&state)
            .await
            .unwrap()
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.id)
            .collect();
        assert_eq!(active, vec![second.id]);

        let missing = activate_training_plan(&state, 9999).await;
        assert!(matches!(missing, Err(crate::error::AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_workouts_between_dates() {
        let state = setup_test_state().await;
        let ids = seed_test_exercises(&state.db).await;
        let start = test_start_date();

        for offset in [0, 2, 6] {
            log_workout(&state, mock_new_workout(start + Duration::days(offset), &[ids[0]])).await.unwrap();
        }

        let logs = workouts_between(&state, start + Duration::days(1), start + Duration::days(6)).await.unwrap();
        let dates: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![start + Duration::days(2), start + Duration::days(6)]);
        assert_eq!(list_exercises(&state).await.unwrap().len(), 4);
    }
}
