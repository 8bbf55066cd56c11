pub mod completion;
pub mod exercise;
pub mod nutrition;
pub mod plan;
pub mod preset_food;
pub mod profile;
pub mod workout;

pub use completion::CompletionRecord;
pub use exercise::{Exercise, MuscleGroup, NewExercise};
pub use nutrition::{DailyMealRecord, FoodItem, Meal, MealType, NewFoodItem, NutritionPlan};
pub use preset_food::{find_preset_foods, preset_food_named, FoodCategory, PresetFood, PRESET_FOODS};
pub use plan::{DayTemplate, NewDayTemplate, NewPlannedExercise, NewTrainingPlan, PlannedExercise, TrainingPlan};
pub use profile::{BodyMetric, Gender, NewBodyMetric, UserProfile};
pub use workout::{NewPerformedSet, NewWorkoutLog, PerformedSet, WorkoutLog};

/// Row identifiers. Entities refer to each other by these, never by reference.
pub type ExerciseId = i64;
pub type PlanId = i64;
pub type TemplateId = i64;
pub type WorkoutLogId = i64;
pub type NutritionPlanId = i64;
