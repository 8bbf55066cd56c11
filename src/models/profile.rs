use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
  Male,
  Female,
  Other,
  #[default]
  PreferNotToSay,
}

impl std::fmt::Display for Gender {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Male => write!(f, "male"),
      Self::Female => write!(f, "female"),
      Self::Other => write!(f, "other"),
      Self::PreferNotToSay => write!(f, "prefer_not_to_say"),
    }
  }
}

impl std::str::FromStr for Gender {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "male" => Ok(Self::Male),
      "female" => Ok(Self::Female),
      "other" => Ok(Self::Other),
      "prefer_not_to_say" => Ok(Self::PreferNotToSay),
      _ => Err(format!("Unknown gender: {}", s)),
    }
  }
}

/// Single-user body attributes feeding the calorie estimates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
  pub full_name: Option<String>,
  pub email: Option<String>,
  pub birthday: Option<NaiveDate>,
  pub gender: Gender,
  pub height_cm: Option<f64>,
  pub weight_kg: Option<f64>,
}

impl UserProfile {
  /// Whole years between birthday and `on` (None without a birthday or for dates before birth)
  pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
    let birthday = self.birthday?;
    on.years_since(birthday)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMetric {
  pub id: i64,
  pub date: NaiveDate,
  /// Monday of the metric's week, used for weekly grouping
  pub week_start: NaiveDate,
  pub weight_kg: Option<f64>,
  pub height_cm: Option<f64>,
  pub body_fat_percentage: Option<f64>,
  pub notes: Option<String>,
}

/// For inserting new body metrics (week_start is derived)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBodyMetric {
  pub date: NaiveDate,
  pub weight_kg: Option<f64>,
  pub height_cm: Option<f64>,
  pub body_fat_percentage: Option<f64>,
  pub notes: Option<String>,
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
