//! Metabolic Estimator
//!
//! Energy expenditure and intake targets from body attributes and workout logs:
//! - BMR via Mifflin-St Jeor
//! - TDEE via fixed activity multipliers
//! - Workout burn as MET x body weight x hours
//! - Daily calorie target and macro split per fitness goal
//!
//! Every function is total. Non-physical inputs (zero weight, negative
//! durations) produce degenerate numbers rather than errors; validating them
//! belongs to whoever collects the input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Gender, UserProfile, WorkoutLog};

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Seconds of work assumed per set when a log carries no duration
const ESTIMATED_SET_WORK_SECONDS: f64 = 45.0;

// ---------------------------------------------------------------------------
/// Activity Level: TDEE multiplier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 training days per week
    Light,
    /// 3-5 training days per week
    Moderate,
    /// 6-7 training days per week
    Active,
    /// Two sessions a day
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

// ---------------------------------------------------------------------------
/// Fitness Goal: calorie delta and macro split
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Fat loss, 500 kcal daily deficit
    Lose,
    Maintain,
    /// Muscle gain, 300 kcal daily surplus
    Gain,
}

impl FitnessGoal {
    fn calorie_delta(&self) -> f64 {
        match self {
            FitnessGoal::Lose => -500.0,
            FitnessGoal::Maintain => 0.0,
            FitnessGoal::Gain => 300.0,
        }
    }

    /// (protein g per kg body weight, share of calories from fat)
    fn macro_split(&self) -> (f64, f64) {
        match self {
            FitnessGoal::Lose => (2.0, 0.25),
            FitnessGoal::Maintain => (1.6, 0.30),
            FitnessGoal::Gain => (1.8, 0.25),
        }
    }
}

// ---------------------------------------------------------------------------
/// Workout Intensity: strength-training MET tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutIntensity {
    /// Light loads, high reps
    Light,
    Moderate,
    /// Heavy loads
    Vigorous,
    /// Near-maximal loads
    VeryVigorous,
}

impl WorkoutIntensity {
    /// Tier for a user-reported 1-10 effort rating; anything else counts as moderate
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            1..=3 => WorkoutIntensity::Light,
            4..=6 => WorkoutIntensity::Moderate,
            7..=8 => WorkoutIntensity::Vigorous,
            9..=10 => WorkoutIntensity::VeryVigorous,
            _ => WorkoutIntensity::Moderate,
        }
    }

    pub fn strength_met(&self) -> f64 {
        match self {
            WorkoutIntensity::Light => 3.5,
            WorkoutIntensity::Moderate => 5.0,
            WorkoutIntensity::Vigorous => 6.0,
            WorkoutIntensity::VeryVigorous => 8.0,
        }
    }
}

/// Intensity of a strength session: the user's rating when present, else a
/// guess from load and rep range (heavier and fewer reps = harder).
pub fn workout_intensity(log: &WorkoutLog) -> WorkoutIntensity {
    if let Some(rating) = log.intensity_rating {
        return WorkoutIntensity::from_rating(rating);
    }

    if log.sets.is_empty() {
        return WorkoutIntensity::Moderate;
    }

    let weights: Vec<f64> = log.sets.iter().filter_map(|s| s.weight_kg).collect();
    let avg_weight = weights.iter().sum::<f64>() / weights.len().max(1) as f64;
    let avg_reps = log.sets.iter().map(|s| s.reps as f64).sum::<f64>() / log.sets.len() as f64;

    if avg_weight > 50.0 && avg_reps < 8.0 {
        WorkoutIntensity::VeryVigorous
    } else if avg_weight > 30.0 && avg_reps < 12.0 {
        WorkoutIntensity::Vigorous
    } else if avg_reps > 15.0 {
        WorkoutIntensity::Light
    } else {
        WorkoutIntensity::Moderate
    }
}

// ---------------------------------------------------------------------------
/// Resting and Daily Expenditure
// ---------------------------------------------------------------------------

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
///
/// `10 x weight + 6.25 x height - 5 x age`, then +5 for men, -161 for women,
/// and -78 (the mean of the two offsets) for anyone else.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;

    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
        Gender::Other | Gender::PreferNotToSay => base - 78.0,
    }
}

pub fn total_daily_energy_expenditure(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

// ---------------------------------------------------------------------------
/// Workout Burn
// ---------------------------------------------------------------------------

/// Calories burned by a strength session, or None without a known body
/// weight or any performed sets.
///
/// Uses the logged duration when present. Otherwise each set is assumed to
/// take 45 s of work plus the average recorded rest (total rest seconds over
/// all sets, in whole seconds).
pub fn strength_training_calories(log: &WorkoutLog, weight_kg: Option<f64>) -> Option<f64> {
    let weight_kg = weight_kg?;
    if log.sets.is_empty() {
        return None;
    }

    let met = workout_intensity(log).strength_met();

    let duration_hours = match log.duration_seconds {
        Some(seconds) => seconds as f64 / 3600.0,
        None => {
            let total_sets = log.sets.len() as u64;
            let total_rest: u64 = log.sets.iter().filter_map(|s| s.rest_seconds).map(u64::from).sum();
            let avg_rest = total_rest / total_sets.max(1);
            total_sets as f64 * (ESTIMATED_SET_WORK_SECONDS + avg_rest as f64) / 3600.0
        }
    };

    Some(met * weight_kg * duration_hours)
}

/// MET for a cardio session rated 1-10; out-of-range ratings get the mid band
pub fn cardio_met(intensity: u8) -> f64 {
    match intensity {
        1..=2 => 3.0,   // slow walk
        3..=4 => 4.5,   // brisk walk
        5..=6 => 6.0,   // jog
        7..=8 => 8.5,   // run
        9..=10 => 11.0, // hard run / intervals
        _ => 6.0,
    }
}

pub fn cardio_calories(duration_minutes: f64, intensity: u8, weight_kg: f64) -> f64 {
    cardio_met(intensity) * weight_kg * (duration_minutes / 60.0)
}

// ---------------------------------------------------------------------------
/// Intake Targets
// ---------------------------------------------------------------------------

pub fn daily_calorie_target(tdee: f64, goal: FitnessGoal) -> f64 {
    tdee + goal.calorie_delta()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    /// May be negative when protein and fat already exceed the calories; not clamped
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Protein is fixed per kg of body weight, fat is a share of calories, and
/// carbs take whatever remains.
pub fn macro_targets(daily_calories: f64, weight_kg: f64, goal: FitnessGoal) -> MacroTargets {
    let (protein_per_kg, fat_share) = goal.macro_split();

    let protein_g = weight_kg * protein_per_kg;
    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN;

    let fat_kcal = daily_calories * fat_share;
    let fat_g = fat_kcal / KCAL_PER_G_FAT;

    let carbs_kcal = daily_calories - protein_kcal - fat_kcal;
    let carbs_g = carbs_kcal / KCAL_PER_G_CARBS;

    MacroTargets {
        protein_g,
        carbs_g,
        fat_g,
    }
}

// ---------------------------------------------------------------------------
/// Profile-driven Targets
// ---------------------------------------------------------------------------

/// BMR through macros for one profile, as the nutrition plan screen shows them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub age_years: u32,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calories: f64,
    pub macros: MacroTargets,
    pub activity_level: ActivityLevel,
    pub goal: FitnessGoal,
}

impl NutritionTargets {
    /// None when the profile lacks weight, height or birthday
    pub fn derive(
        profile: &UserProfile,
        on: NaiveDate,
        activity_level: ActivityLevel,
        goal: FitnessGoal,
    ) -> Option<Self> {
        let weight_kg = profile.weight_kg?;
        let height_cm = profile.height_cm?;
        let age_years = profile.age_on(on)?;

        let bmr = basal_metabolic_rate(weight_kg, height_cm, age_years, profile.gender);
        let tdee = total_daily_energy_expenditure(bmr, activity_level);
        let daily_calories = daily_calorie_target(tdee, goal);
        let macros = macro_targets(daily_calories, weight_kg, goal);

        Some(Self {
            age_years,
            bmr,
            tdee,
            daily_calories,
            macros,
            activity_level,
            goal,
        })
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
