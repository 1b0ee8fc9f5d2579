//! Regroups the flat workout/exercise/set join into nested workouts.

use std::collections::BTreeMap;

use crate::date::CanonicalDate;
use crate::error::{AppError, Result};
use crate::models::set::parse_weight;
use crate::models::{ExerciseWithSets, SetSummary, WorkoutWithExercises};

/// One row of the left join workouts -> workout_exercises -> exercises -> sets
///
/// The exercise columns are NULL for a workout without exercises, and the set
/// columns are NULL for an exercise without sets.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AggregateRow {
    pub workout_id: i64,
    pub workout_name: Option<String>,
    pub workout_date: CanonicalDate,
    pub workout_exercise_id: Option<i64>,
    pub exercise_order: Option<i64>,
    pub exercise_name: Option<String>,
    pub set_id: Option<i64>,
    pub set_number: Option<i64>,
    pub weight: Option<String>,
    pub reps: Option<i64>,
}

struct WorkoutGroup {
    name: Option<String>,
    date: CanonicalDate,
    exercises: BTreeMap<i64, ExerciseGroup>,
}

struct ExerciseGroup {
    order: i64,
    name: String,
    /// (set_number, set_id, summary)
    sets: Vec<(i64, i64, SetSummary)>,
}

/// Nest flat rows into workouts, ordered by id
///
/// Exercises come out ascending by `order` (then workout-exercise id) and
/// sets ascending by `set_number` (then set id), whatever order the rows
/// arrive in. An exercise row without its exercise name, or a set row with
/// missing or non-numeric columns, is an integrity violation.
pub fn assemble(rows: Vec<AggregateRow>) -> Result<Vec<WorkoutWithExercises>> {
    let mut workouts: BTreeMap<i64, WorkoutGroup> = BTreeMap::new();

    for row in rows {
        let workout = workouts.entry(row.workout_id).or_insert_with(|| WorkoutGroup {
            name: row.workout_name.clone(),
            date: row.workout_date,
            exercises: BTreeMap::new(),
        });

        let Some(workout_exercise_id) = row.workout_exercise_id else {
            continue;
        };

        if !workout.exercises.contains_key(&workout_exercise_id) {
            let name = row.exercise_name.clone().ok_or_else(|| {
                AppError::IntegrityViolation(format!(
                    "workout exercise {} references a missing exercise",
                    workout_exercise_id
                ))
            })?;
            let order = row.exercise_order.ok_or_else(|| {
                AppError::IntegrityViolation(format!(
                    "workout exercise {} has no order",
                    workout_exercise_id
                ))
            })?;
            workout.exercises.insert(
                workout_exercise_id,
                ExerciseGroup {
                    order,
                    name,
                    sets: Vec::new(),
                },
            );
        }

        let Some(set_id) = row.set_id else {
            continue;
        };

        let (set_number, weight, reps) = match (row.set_number, row.weight.as_deref(), row.reps) {
            (Some(n), Some(w), Some(r)) => (n, parse_weight(w, set_id)?, r),
            _ => {
                return Err(AppError::IntegrityViolation(format!(
                    "set {} is missing columns",
                    set_id
                )));
            }
        };

        if let Some(exercise) = workout.exercises.get_mut(&workout_exercise_id) {
            exercise
                .sets
                .push((set_number, set_id, SetSummary { weight, reps }));
        }
    }

    let assembled = workouts
        .into_iter()
        .map(|(id, group)| {
            let mut exercises: Vec<(i64, i64, ExerciseGroup)> = group
                .exercises
                .into_iter()
                .map(|(we_id, exercise)| (exercise.order, we_id, exercise))
                .collect();
            exercises.sort_by_key(|(order, we_id, _)| (*order, *we_id));

            WorkoutWithExercises {
                id,
                name: group.name,
                date: group.date,
                exercises: exercises
                    .into_iter()
                    .map(|(_, we_id, mut exercise)| {
                        exercise.sets.sort_by_key(|(number, set_id, _)| (*number, *set_id));
                        ExerciseWithSets {
                            id: we_id,
                            name: exercise.name,
                            sets: exercise.sets.into_iter().map(|(_, _, s)| s).collect(),
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(assembled)
}
