//! Dashboard commands

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::dashboard::{
    assess_progress, daily_balance, daily_burn_series, latest_weight, predict_weight_trend, total_calorie_deficit, weight_change,
    workout_count, BurnSummary, DailyBalance, DailyValue, DashboardPeriod, ProgressVerdict, WeightTrend,
};
use crate::db::AppState;
use crate::error::AppResult;
use crate::models::BodyMetric;
use crate::store;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieDashboard {
    pub period: DashboardPeriod,
    pub burned: Vec<DailyValue>,
    pub summary: BurnSummary,
    /// Empty without an active nutrition plan
    pub balance: Vec<DailyBalance>,
    pub daily_calorie_target: Option<f64>,
}

pub async fn calorie_dashboard(state: &AppState, period: DashboardPeriod) -> AppResult<CalorieDashboard> {
    let end = state.zone.today();
    let start = period.first_day(end);
    let logs = store::workouts::load_workouts_between(&state.db, start, end).await?;

    let burned = daily_burn_series(&logs, end, period);
    let summary = BurnSummary::from_series(&burned);

    let nutrition_plan = store::nutrition::load_active_nutrition_plan(&state.db).await?;
    let balance = match &nutrition_plan {
        Some(plan) => {
            let records = store::nutrition::load_meal_records(&state.db, plan.id, start, end).await?;
            daily_balance(&records, &logs, end, period)
        }
        None => Vec::new(),
    };

    Ok(CalorieDashboard {
        period,
        burned,
        summary,
        balance,
        daily_calorie_target: nutrition_plan.map(|p| p.daily_calorie_target),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDashboard {
    pub period: DashboardPeriod,
    pub current_weight: Option<f64>,
    pub weight_change: Option<f64>,
    /// 0 without an active nutrition plan
    pub total_calorie_deficit: f64,
    pub workout_count: usize,
    pub predicted_trend: Option<WeightTrend>,
    pub progress_verdict: Option<ProgressVerdict>,
    /// Measurements within the period, oldest first
    pub metrics: Vec<BodyMetric>,
}

pub async fn body_dashboard(state: &AppState, period: DashboardPeriod) -> AppResult<BodyDashboard> {
    let today = state.zone.today();
    let start = period.first_day(today);

    let all_metrics = store::profile::list_body_metrics_through(&state.db, today).await?;
    let change = weight_change(&all_metrics, today, period);

    let logs = store::workouts::load_workouts_between(&state.db, start, today).await?;
    let workouts = workout_count(&logs, today, period);

    let deficit = match store::nutrition::load_active_nutrition_plan(&state.db).await? {
        Some(plan) => {
            let records = store::nutrition::load_meal_records(&state.db, plan.id, start, today).await?;
            total_calorie_deficit(&daily_balance(&records, &logs, today, period), plan.daily_calorie_target)
        }
        None => 0.0,
    };

    // Weigh-ins from the day the baseline is taken onward
    let window_start = today - Duration::days(i64::from(period.days()));
    let metrics = all_metrics.iter().filter(|m| m.date > window_start).cloned().collect();

    Ok(BodyDashboard {
        period,
        current_weight: latest_weight(&all_metrics, today),
        weight_change: change,
        total_calorie_deficit: deficit,
        workout_count: workouts,
        predicted_trend: predict_weight_trend(change, workouts, deficit, period),
        progress_verdict: assess_progress(change, workouts, deficit, period),
        metrics,
    })
}
