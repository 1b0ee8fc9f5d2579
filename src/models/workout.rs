use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_WORKOUT_NAME_TOO_LONG, MAX_WORKOUT_NAME_CHARS};
use crate::date::CanonicalDate;
use crate::error::{AppError, Result};
use crate::models::set::SetSummary;

/// Workout row as stored
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub user_id: String,
    pub name: Option<String>,
    pub date: CanonicalDate,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workout fields submitted by a client for create or update
///
/// A blank `name` is stored as NULL rather than as an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutInput {
    #[serde(default)]
    pub name: Option<String>,
    /// Missing dates deserialize as empty and fail validation
    #[serde(default)]
    pub date: String,
}

/// What to do with the name column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameChange {
    /// Field was not submitted; updates leave the stored name alone
    Keep,
    /// Submitted blank; stored as NULL
    Clear,
    Set(String),
}

impl NameChange {
    /// The value to write when there is no stored name to keep
    pub fn into_initial(self) -> Option<String> {
        match self {
            NameChange::Set(name) => Some(name),
            NameChange::Keep | NameChange::Clear => None,
        }
    }
}

/// Workout input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidWorkout {
    pub name: NameChange,
    pub date: CanonicalDate,
}

impl WorkoutInput {
    /// Check the date format and name length
    ///
    /// Runs before any storage call; a failure names the offending field.
    pub fn validate(&self) -> Result<ValidWorkout> {
        let date = CanonicalDate::parse(&self.date)
            .map_err(|e| AppError::validation("date", e.to_string()))?;

        let name = match self.name.as_deref() {
            None => NameChange::Keep,
            Some(name) if name.chars().count() > MAX_WORKOUT_NAME_CHARS => {
                return Err(AppError::validation("name", ERR_WORKOUT_NAME_TOO_LONG));
            }
            Some(name) if name.trim().is_empty() => NameChange::Clear,
            Some(name) => NameChange::Set(name.to_string()),
        };

        Ok(ValidWorkout { name, date })
    }
}

/// A workout with its exercises and their sets, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutWithExercises {
    pub id: i64,
    pub name: Option<String>,
    pub date: CanonicalDate,
    pub exercises: Vec<ExerciseWithSets>,
}

/// One exercise inside a workout; `id` is the workout-exercise id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseWithSets {
    pub id: i64,
    pub name: String,
    pub sets: Vec<SetSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, date: &str) -> WorkoutInput {
        WorkoutInput {
            name: name.map(str::to_string),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_named_workout() {
        let valid = input(Some("Leg Day"), "2024-03-15").validate().unwrap();
        assert_eq!(valid.name, NameChange::Set("Leg Day".to_string()));
        assert_eq!(valid.date.to_string(), "2024-03-15");
    }

    #[test]
    fn test_validate_rejects_bad_date_format() {
        let err = input(None, "03/15/2024").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "date", .. }));
    }

    #[test]
    fn test_name_length_is_counted_in_characters() {
        // 100 two-byte characters fit, 101 do not
        assert!(input(Some(&"é".repeat(100)), "2024-03-15").validate().is_ok());

        let err = input(Some(&"a".repeat(101)), "2024-03-15")
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_missing_and_blank_names() {
        assert_eq!(
            input(None, "2024-03-15").validate().unwrap().name,
            NameChange::Keep
        );
        assert_eq!(
            input(Some("  "), "2024-03-15").validate().unwrap().name,
            NameChange::Clear
        );
        assert_eq!(NameChange::Clear.into_initial(), None);
        assert_eq!(NameChange::Keep.into_initial(), None);
    }

    #[test]
    fn test_missing_date_is_a_validation_error() {
        let parsed: WorkoutInput = serde_json::from_str(r#"{"name":"Leg Day"}"#).unwrap();
        let err = parsed.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "date", .. }));
    }

    #[test]
    fn test_deserialize_without_name() {
        let parsed: WorkoutInput = serde_json::from_str(r#"{"date":"2024-03-15"}"#).unwrap();
        assert!(parsed.name.is_none());
        assert_eq!(parsed.date, "2024-03-15");
    }

    #[test]
    fn test_aggregate_serializes_weight_as_number() {
        let workout = WorkoutWithExercises {
            id: 1,
            name: Some("Push".to_string()),
            date: CanonicalDate::parse("2024-03-15").unwrap(),
            exercises: vec![ExerciseWithSets {
                id: 7,
                name: "Bench Press".to_string(),
                sets: vec![SetSummary {
                    weight: 135.5,
                    reps: 10,
                }],
            }],
        };

        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["exercises"][0]["sets"][0]["weight"], 135.5);
        assert_eq!(json["exercises"][0]["sets"][0]["reps"], 10);
    }
}
