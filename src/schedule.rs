//! Cycle Calculator
//!
//! Maps calendar days onto a plan's repeating N-day cycle. All comparisons
//! are on `NaiveDate`, so time of day never shifts a result; callers turn
//! instants into days through `CalendarZone` first.

use chrono::NaiveDate;

use crate::models::{DayTemplate, TrainingPlan};

/// 1-indexed position of `date` in the plan's cycle.
///
/// Returns 0 when the date falls before the plan's start date (no cycle day
/// applies yet). Otherwise `(days_since_start % cycle_days) + 1`, which is
/// always within `1..=cycle_days`.
pub fn cycle_day(date: NaiveDate, plan: &TrainingPlan) -> u32 {
    if date < plan.start_date || plan.cycle_days == 0 {
        return 0;
    }

    let days_since_start = (date - plan.start_date).num_days();
    (days_since_start % i64::from(plan.cycle_days)) as u32 + 1
}

/// Template scheduled for `date`, or None before the plan starts or when the
/// plan leaves that cycle position empty.
pub fn template_for_date(date: NaiveDate, plan: &TrainingPlan) -> Option<&DayTemplate> {
    match cycle_day(date, plan) {
        0 => None,
        day => plan.template(day),
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn template(day_number: u32, is_rest_day: bool) -> DayTemplate {
        DayTemplate {
            id: day_number as i64,
            plan_id: 1,
            day_number,
            name: None,
            is_rest_day,
            exercises: Vec::new(),
        }
    }

    fn make_plan(cycle_days: u32, start: NaiveDate) -> TrainingPlan {
        TrainingPlan {
            id: 1,
            name: "Push Pull Legs".to_string(),
            cycle_days,
            start_date: start,
            is_active: true,
            day_templates: vec![template(1, false), template(2, false), template(4, true)],
        }
    }

    #[test]
    fn test_weekly_cycle_scenario() {
        // 2026-01-05 is a Monday
        let plan = make_plan(7, d(2026, 1, 5));
        assert_eq!(cycle_day(d(2026, 1, 5), &plan), 1);
        assert_eq!(cycle_day(d(2026, 1, 12), &plan), 1);
        assert_eq!(cycle_day(d(2026, 1, 8), &plan), 4);
    }

    #[test]
    fn test_start_date_is_day_one() {
        for cycle_days in 1..=10 {
            let plan = make_plan(cycle_days, d(2025, 12, 30));
            assert_eq!(cycle_day(plan.start_date, &plan), 1);
        }
    }

    #[test]
    fn test_dates_before_start_have_no_cycle_day() {
        let plan = make_plan(3, d(2026, 1, 5));
        assert_eq!(cycle_day(d(2026, 1, 4), &plan), 0);
        assert_eq!(cycle_day(d(2025, 6, 1), &plan), 0);
        assert!(template_for_date(d(2026, 1, 4), &plan).is_none());
    }

    #[test]
    fn test_cycle_day_stays_in_range() {
        let plan = make_plan(5, d(2026, 1, 5));
        let mut date = d(2025, 12, 1);
        while date < d(2026, 6, 1) {
            let day = cycle_day(date, &plan);
            assert!(day <= plan.cycle_days, "{} out of range for {}", day, date);
            assert_eq!(day == 0, date < plan.start_date);
            date += Duration::days(1);
        }
    }

    #[test]
    fn test_periodicity() {
        let plan = make_plan(6, d(2026, 1, 5));
        for offset in 0..12 {
            let date = plan.start_date + Duration::days(offset);
            for k in 0..5 {
                let later = date + Duration::days(k * plan.cycle_days as i64);
                assert_eq!(cycle_day(date, &plan), cycle_day(later, &plan));
            }
        }
    }

    #[test]
    fn test_single_day_cycle_always_day_one() {
        let plan = make_plan(1, d(2026, 1, 5));
        assert_eq!(cycle_day(d(2026, 1, 5), &plan), 1);
        assert_eq!(cycle_day(d(2026, 3, 17), &plan), 1);
    }

    #[test]
    fn test_zero_cycle_days_yields_sentinel() {
        let plan = make_plan(0, d(2026, 1, 5));
        assert_eq!(cycle_day(d(2026, 1, 9), &plan), 0);
    }

    #[test]
    fn test_template_lookup() {
        let plan = make_plan(7, d(2026, 1, 5));
        assert_eq!(template_for_date(d(2026, 1, 6), &plan).map(|t| t.day_number), Some(2));

        let rest = template_for_date(d(2026, 1, 8), &plan).unwrap();
        assert!(rest.is_rest_day);

        // Day 3 has no template
        assert!(template_for_date(d(2026, 1, 7), &plan).is_none());
    }
}
