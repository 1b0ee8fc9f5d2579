use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_INVALID_REPS, ERR_INVALID_WEIGHT};
use crate::error::{AppError, Result};

/// Set row as stored; `weight` is a decimal string
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SetRow {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub set_number: i64,
    pub weight: String,
    pub reps: i64,
    pub created_at: DateTime<Utc>,
}

/// A performed set with its weight as a number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SetRow> for Set {
    type Error = AppError;

    fn try_from(row: SetRow) -> Result<Self> {
        Ok(Set {
            weight: parse_weight(&row.weight, row.id)?,
            id: row.id,
            workout_exercise_id: row.workout_exercise_id,
            set_number: row.set_number,
            reps: row.reps,
            created_at: row.created_at,
        })
    }
}

/// Weight and reps of one set, as shown under an exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSummary {
    pub weight: f64,
    pub reps: i64,
}

/// Set fields submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct SetInput {
    pub weight: f64,
    pub reps: i64,
}

/// Set input that passed validation, with the weight in storage form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSet {
    pub weight: String,
    pub reps: i64,
}

impl SetInput {
    pub fn validate(&self) -> Result<ValidSet> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(AppError::validation("weight", ERR_INVALID_WEIGHT));
        }
        if self.reps < 1 {
            return Err(AppError::validation("reps", ERR_INVALID_REPS));
        }

        Ok(ValidSet {
            weight: format_weight(self.weight),
            reps: self.reps,
        })
    }
}

/// Decimal string for a weight; `-0.0` is written as `0`
pub fn format_weight(weight: f64) -> String {
    if weight == 0.0 {
        "0".to_string()
    } else {
        weight.to_string()
    }
}

/// Numeric value of a stored weight
///
/// The column is only ever written from validated input, so text that does
/// not parse means the row was corrupted outside this service.
pub fn parse_weight(stored: &str, set_id: i64) -> Result<f64> {
    stored
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| {
            AppError::IntegrityViolation(format!(
                "set {} has non-numeric weight {:?}",
                set_id, stored
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_set_input() {
        let valid = SetInput {
            weight: 135.5,
            reps: 8,
        }
        .validate()
        .unwrap();
        assert_eq!(valid.weight, "135.5");
        assert_eq!(valid.reps, 8);

        // Bodyweight sets log zero
        assert!(SetInput { weight: 0.0, reps: 12 }.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            (SetInput { weight: -5.0, reps: 5 }, "weight"),
            (SetInput { weight: f64::NAN, reps: 5 }, "weight"),
            (SetInput { weight: f64::INFINITY, reps: 5 }, "weight"),
            (SetInput { weight: 100.0, reps: 0 }, "reps"),
            (SetInput { weight: 100.0, reps: -3 }, "reps"),
        ];

        for (input, expected_field) in cases {
            match input.validate() {
                Err(AppError::Validation { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_weight_text_round_trip() {
        for weight in [0.0, 2.5, 135.0, 142.75, 1000.125] {
            let stored = format_weight(weight);
            assert_eq!(parse_weight(&stored, 1).unwrap(), weight);
        }
        assert_eq!(format_weight(135.0), "135");
        assert_eq!(format_weight(-0.0), "0");
    }

    #[test]
    fn test_parse_weight_accepts_numeric_column_text() {
        assert_eq!(parse_weight("135.00", 1).unwrap(), 135.0);
        assert_eq!(parse_weight(" 60 ", 1).unwrap(), 60.0);
    }

    #[test]
    fn test_parse_weight_flags_corrupt_rows() {
        let err = parse_weight("heavy", 42).unwrap_err();
        match err {
            AppError::IntegrityViolation(detail) => assert!(detail.contains("set 42")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(parse_weight("inf", 1).is_err());
    }
}
