//! Operations the UI layer calls. Each takes the shared `AppState` and
//! returns `AppResult`, which serializes errors as plain messages.

pub mod calendar;
pub mod dashboard;
pub mod nutrition;
pub mod preferences;
pub mod profile;
pub mod training;

pub use calendar::calendar_month;
pub use dashboard::{body_dashboard, calorie_dashboard};
pub use nutrition::{create_nutrition_plan_from_profile, nutrition_targets};
pub use preferences::{get_preferences, update_preferences};
pub use training::{evaluate_day, log_workout, today_training};
