//! Dashboard aggregation
//!
//! Period summaries for the calorie and body-metrics dashboards. A period is
//! the `days` calendar days ending at (and including) a given date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{BodyMetric, DailyMealRecord, WorkoutLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPeriod {
    Week,
    Month,
    Quarter,
    Year,
}

impl DashboardPeriod {
    pub fn days(&self) -> u32 {
        match self {
            DashboardPeriod::Week => 7,
            DashboardPeriod::Month => 30,
            DashboardPeriod::Quarter => 90,
            DashboardPeriod::Year => 365,
        }
    }

    /// First day of the period ending at `end`
    pub fn first_day(&self, end: NaiveDate) -> NaiveDate {
        end - Duration::days(i64::from(self.days()) - 1)
    }

    /// Every day of the period ending at `end`, oldest first
    pub fn dates(&self, end: NaiveDate) -> Vec<NaiveDate> {
        self.first_day(end).iter_days().take(self.days() as usize).collect()
    }

    /// Full weeks in the period, at least one
    fn weeks(&self) -> u32 {
        (self.days() / 7).max(1)
    }
}

impl std::str::FromStr for DashboardPeriod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            _ => Err(format!("Unknown dashboard period: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
/// Calories Burned
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

fn burned_on(logs: &[WorkoutLog], date: NaiveDate) -> f64 {
    logs.iter()
        .filter(|log| log.date == date)
        .filter_map(|log| log.calories_burned)
        .sum()
}

fn intake_on(records: &[DailyMealRecord], date: NaiveDate) -> f64 {
    records
        .iter()
        .find(|r| r.date == date)
        .map(DailyMealRecord::total_calories)
        .unwrap_or(0.0)
}

/// Logged calories burned per day; days without logs are 0
pub fn daily_burn_series(logs: &[WorkoutLog], end: NaiveDate, period: DashboardPeriod) -> Vec<DailyValue> {
    period
        .dates(end)
        .into_iter()
        .map(|date| DailyValue {
            date,
            value: burned_on(logs, date),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnSummary {
    pub total: f64,
    /// Over days that burned anything
    pub daily_average: f64,
    pub max: f64,
}

impl BurnSummary {
    pub fn from_series(series: &[DailyValue]) -> Self {
        let active: Vec<f64> = series.iter().map(|p| p.value).filter(|v| *v > 0.0).collect();
        let total: f64 = active.iter().sum();
        let daily_average = if active.is_empty() {
            0.0
        } else {
            total / active.len() as f64
        };
        let max = active.iter().copied().fold(0.0, f64::max);

        Self {
            total,
            daily_average,
            max,
        }
    }
}

// ---------------------------------------------------------------------------
/// Energy Balance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub intake: f64,
    pub burned: f64,
    /// intake - burned
    pub net: f64,
}

/// Intake from one plan's meal records against logged burn, per day
pub fn daily_balance(
    records: &[DailyMealRecord],
    logs: &[WorkoutLog],
    end: NaiveDate,
    period: DashboardPeriod,
) -> Vec<DailyBalance> {
    period
        .dates(end)
        .into_iter()
        .map(|date| {
            let intake = intake_on(records, date);
            let burned = burned_on(logs, date);
            DailyBalance {
                date,
                intake,
                burned,
                net: intake - burned,
            }
        })
        .collect()
}

/// Sum of (intake - burned - target) over the days; negative is a deficit
pub fn total_calorie_deficit(balance: &[DailyBalance], daily_calorie_target: f64) -> f64 {
    balance.iter().map(|day| day.net - daily_calorie_target).sum()
}

// ---------------------------------------------------------------------------
/// Body Weight
// ---------------------------------------------------------------------------

/// Most recent recorded weight on or before `on`
pub fn latest_weight(metrics: &[BodyMetric], on: NaiveDate) -> Option<f64> {
    metrics
        .iter()
        .filter(|m| m.date <= on && m.weight_kg.is_some())
        .max_by_key(|m| m.date)
        .and_then(|m| m.weight_kg)
}

/// Current weight minus the last weight recorded before the period began.
///
/// None when either end has no weigh-in.
pub fn weight_change(metrics: &[BodyMetric], today: NaiveDate, period: DashboardPeriod) -> Option<f64> {
    let current = latest_weight(metrics, today)?;
    let baseline = latest_weight(metrics, today - Duration::days(i64::from(period.days())))?;
    Some(current - baseline)
}

/// Workouts logged within the period ending at `end`
pub fn workout_count(logs: &[WorkoutLog], end: NaiveDate, period: DashboardPeriod) -> usize {
    let first = period.first_day(end);
    logs.iter().filter(|log| log.date >= first && log.date <= end).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    Down,
    Steady,
    Up,
}

/// Rough direction of body weight from training frequency and calorie balance.
///
/// Needs a measured weight change and at least one workout. Frequent training
/// (4+/week) with any deficit, or 3+/week with a deficit beyond 1000 kcal,
/// points down; a surplus beyond 2000 kcal points up.
pub fn predict_weight_trend(
    weight_change: Option<f64>,
    workout_count: usize,
    calorie_deficit: f64,
    period: DashboardPeriod,
) -> Option<WeightTrend> {
    weight_change?;
    if workout_count == 0 {
        return None;
    }

    let weekly_workouts = workout_count as f64 / f64::from(period.weeks());

    let trend = if weekly_workouts >= 4.0 && calorie_deficit < 0.0 {
        WeightTrend::Down
    } else if weekly_workouts >= 3.0 && calorie_deficit < -1000.0 {
        WeightTrend::Down
    } else if calorie_deficit > 2000.0 {
        WeightTrend::Up
    } else {
        WeightTrend::Steady
    };

    Some(trend)
}

/// How training frequency and calorie balance line up with the weight change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressVerdict {
    /// 4+ workouts a week and an average deficit beyond 300 kcal a day
    OnTrack,
    /// 3+ workouts a week and weight going down
    TrainingPaysOff,
    /// Under 2 workouts a week and weight within half a kilo
    TrainMore,
    /// Average surplus above 500 kcal a day
    IntakeHigh,
    KeepLogging,
}

/// None without a measured weight change. Unlike the trend, zero workouts
/// still get a verdict.
pub fn assess_progress(
    weight_change: Option<f64>,
    workout_count: usize,
    calorie_deficit: f64,
    period: DashboardPeriod,
) -> Option<ProgressVerdict> {
    let change = weight_change?;
    let weekly_workouts = workout_count as f64 / f64::from(period.weeks());
    let daily_deficit = calorie_deficit / f64::from(period.days());

    let verdict = if weekly_workouts >= 4.0 && daily_deficit < -300.0 {
        ProgressVerdict::OnTrack
    } else if weekly_workouts >= 3.0 && change < 0.0 {
        ProgressVerdict::TrainingPaysOff
    } else if weekly_workouts < 2.0 && change.abs() < 0.5 {
        ProgressVerdict::TrainMore
    } else if daily_deficit > 500.0 {
        ProgressVerdict::IntakeHigh
    } else {
        ProgressVerdict::KeepLogging
    };

    Some(verdict)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
