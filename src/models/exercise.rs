use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_EXERCISE_NAME_LENGTH, MAX_EXERCISE_NAME_CHARS};
use crate::error::{AppError, Result};

/// Exercise library entry; `user_id` is `None` for shared entries
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An exercise placed in a workout at a position
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
}

impl ExerciseInput {
    /// Trimmed exercise name, 1 to 100 characters
    pub fn validate(&self) -> Result<String> {
        let name = self.name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_EXERCISE_NAME_CHARS {
            return Err(AppError::validation("name", ERR_EXERCISE_NAME_LENGTH));
        }
        Ok(name.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseInput {
    pub exercise_id: i64,
}
