//! Calendar Status Classifier
//!
//! Derives the status a calendar cell shows for one date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{CompletionRecord, TrainingPlan};
use crate::schedule::template_for_date;

/// ---------------------------------------------------------------------------
/// Day Status
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalendarDayStatus {
  /// Not yet evaluable: future dates, no plan, or before the plan started
  Future,
  CompletedFull,
  CompletedPartial { percentage: f64 },
  Missed,
  RestDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
  Gray,
  Green,
  Yellow,
  Orange,
  Red,
  Blue,
}

impl CalendarDayStatus {
  pub fn color(&self) -> StatusColor {
    match self {
      CalendarDayStatus::Future => StatusColor::Gray,
      CalendarDayStatus::CompletedFull => StatusColor::Green,
      CalendarDayStatus::CompletedPartial { percentage } if *percentage > 0.5 => StatusColor::Yellow,
      CalendarDayStatus::CompletedPartial { .. } => StatusColor::Orange,
      CalendarDayStatus::Missed => StatusColor::Red,
      CalendarDayStatus::RestDay => StatusColor::Blue,
    }
  }
}

/// Status of `date` as seen on `today`.
///
/// The order of checks matters: future, no-plan and pre-start dates are never
/// penalized, and a rest day wins over whatever completion says.
pub fn classify_status(
  date: NaiveDate,
  today: NaiveDate,
  plan: Option<&TrainingPlan>,
  completion: Option<&CompletionRecord>,
) -> CalendarDayStatus {
  if date > today {
    return CalendarDayStatus::Future;
  }

  let Some(plan) = plan else {
    return CalendarDayStatus::Future;
  };

  if date < plan.start_date {
    return CalendarDayStatus::Future;
  }

  if template_for_date(date, plan).is_some_and(|t| t.is_rest_day) {
    return CalendarDayStatus::RestDay;
  }

  let Some(completion) = completion else {
    return CalendarDayStatus::Missed;
  };

  let pct = completion.completion_percentage;
  if pct >= 1.0 {
    CalendarDayStatus::CompletedFull
  } else if pct > 0.0 {
    CalendarDayStatus::CompletedPartial { percentage: pct }
  } else {
    CalendarDayStatus::Missed
  }
}

/// ---------------------------------------------------------------------------
/// Month Grid Helpers
/// ---------------------------------------------------------------------------

/// Every date of a month, in order (empty for an invalid year/month)
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
  let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
    return Vec::new();
  };

  first
    .iter_days()
    .take_while(|d| d.month() == month)
    .collect()
}

/// Blank cells before the 1st in a Sunday-first week grid
pub fn leading_padding(first_day: NaiveDate) -> u32 {
  first_day.weekday().num_days_from_sunday()
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
  let (y, m) = if date.month() == 12 {
    (date.year() + 1, 1)
  } else {
    (date.year(), date.month() + 1)
  };
  NaiveDate::from_ymd_opt(y, m, 1)
    .map(|next| next - Duration::days(1))
    .unwrap_or(date)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
