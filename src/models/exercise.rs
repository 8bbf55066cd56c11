use serde::{Deserialize, Serialize};

use super::ExerciseId;
use crate::config::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
  Chest,
  Back,
  Shoulders,
  Biceps,
  Triceps,
  Legs,
  Core,
  Cardio,
  FullBody,
}

impl MuscleGroup {
  pub const ALL: [MuscleGroup; 9] = [
    MuscleGroup::Chest,
    MuscleGroup::Back,
    MuscleGroup::Shoulders,
    MuscleGroup::Biceps,
    MuscleGroup::Triceps,
    MuscleGroup::Legs,
    MuscleGroup::Core,
    MuscleGroup::Cardio,
    MuscleGroup::FullBody,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      MuscleGroup::Chest => "chest",
      MuscleGroup::Back => "back",
      MuscleGroup::Shoulders => "shoulders",
      MuscleGroup::Biceps => "biceps",
      MuscleGroup::Triceps => "triceps",
      MuscleGroup::Legs => "legs",
      MuscleGroup::Core => "core",
      MuscleGroup::Cardio => "cardio",
      MuscleGroup::FullBody => "full_body",
    }
  }
}

impl std::fmt::Display for MuscleGroup {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for MuscleGroup {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    MuscleGroup::ALL
      .iter()
      .copied()
      .find(|g| g.as_str() == s)
      .ok_or_else(|| format!("Unknown muscle group: {}", s))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
  pub id: ExerciseId,
  pub name_english: String,
  pub name_chinese: String,
  pub muscle_group: MuscleGroup,
  pub is_custom: bool,
  pub video_youtube: Option<String>,
  pub video_bilibili: Option<String>,
  pub default_sets: Option<u32>,
  pub default_reps: Option<u32>,
  pub default_rest_seconds: Option<u32>,
}

impl Exercise {
  pub fn display_name(&self, language: Language) -> &str {
    match language {
      Language::English => &self.name_english,
      Language::Chinese => &self.name_chinese,
    }
  }
}

/// For inserting new exercises (without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
  pub name_english: String,
  pub name_chinese: String,
  pub muscle_group: MuscleGroup,
  pub is_custom: bool,
  pub video_youtube: Option<String>,
  pub video_bilibili: Option<String>,
  pub default_sets: Option<u32>,
  pub default_reps: Option<u32>,
  pub default_rest_seconds: Option<u32>,
}

impl NewExercise {
  pub fn builtin(name_english: &str, name_chinese: &str, muscle_group: MuscleGroup) -> Self {
    Self {
      name_english: name_english.to_string(),
      name_chinese: name_chinese.to_string(),
      muscle_group,
      is_custom: false,
      video_youtube: None,
      video_bilibili: None,
      default_sets: None,
      default_reps: None,
      default_rest_seconds: None,
    }
  }
}
