//! Completion Evaluator
//!
//! Compares the exercises a plan schedules for a date with the exercises a
//! workout log actually contains.
//!
//! Completion is counted per exercise, not per set or per target volume: one
//! performed set of a planned exercise marks that exercise completed. A rest
//! day is fully complete regardless of the log, while a training day with no
//! planned exercises is 0% complete.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{CompletionRecord, ExerciseId, TrainingPlan, WorkoutLog};
use crate::schedule::{cycle_day, template_for_date};

pub fn evaluate_completion(
    date: NaiveDate,
    plan: &TrainingPlan,
    workout_log: Option<&WorkoutLog>,
) -> CompletionRecord {
    let day_number = cycle_day(date, plan);

    let Some(template) = template_for_date(date, plan) else {
        return CompletionRecord::flat(date, plan.id, day_number, 0.0);
    };

    if template.is_rest_day {
        return CompletionRecord::flat(date, plan.id, day_number, 1.0);
    }

    let planned: BTreeSet<ExerciseId> = template.exercises.iter().map(|e| e.exercise_id).collect();
    if planned.is_empty() {
        return CompletionRecord::flat(date, plan.id, day_number, 0.0);
    }

    let performed = workout_log
        .map(WorkoutLog::performed_exercise_ids)
        .unwrap_or_default();

    let completed: BTreeSet<ExerciseId> = planned.intersection(&performed).copied().collect();
    let missed: BTreeSet<ExerciseId> = planned.difference(&performed).copied().collect();
    let completion_percentage = completed.len() as f64 / planned.len() as f64;

    CompletionRecord {
        date,
        plan_id: plan.id,
        day_number,
        completed_exercise_ids: completed,
        missed_exercise_ids: missed,
        completion_percentage,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
