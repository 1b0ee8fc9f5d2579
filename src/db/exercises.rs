//! Exercise library and set logging
//!
//! Follows the same rule as workouts: the owner's id is part of every
//! statement, and inserts that hang off a workout select their parent rows
//! through an ownership-filtered join, so nothing is written under someone
//! else's workout.

use chrono::Utc;

use crate::db::Db;
use crate::error::Result;
use crate::models::{Exercise, ExerciseInput, Set, SetInput, SetRow, UserId, WorkoutExercise};

/// Add an exercise to the caller's own library
pub async fn create_exercise(db: &Db, user_id: &UserId, input: &ExerciseInput) -> Result<Exercise> {
    let name = input.validate()?;
    let now = Utc::now();

    let exercise = sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (name, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, name, user_id, created_at, updated_at",
    )
    .bind(name)
    .bind(user_id.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;

    tracing::info!("Exercise {} created for user {}", exercise.id, user_id);

    Ok(exercise)
}

/// Shared library entries plus the caller's own, by name
pub async fn list_exercises(db: &Db, user_id: &UserId) -> Result<Vec<Exercise>> {
    let exercises = sqlx::query_as::<_, Exercise>(
        "SELECT id, name, user_id, created_at, updated_at \
         FROM exercises \
         WHERE user_id IS NULL OR user_id = ? \
         ORDER BY name COLLATE NOCASE, id",
    )
    .bind(user_id.as_str())
    .fetch_all(db)
    .await?;

    Ok(exercises)
}

/// Append an exercise to the end of a workout
///
/// The new entry takes the next `order` after the workout's current last
/// one. Returns `None` unless the workout belongs to `user_id` and the
/// exercise is shared or also belongs to `user_id`.
pub async fn add_exercise_to_workout(
    db: &Db,
    user_id: &UserId,
    workout_id: i64,
    exercise_id: i64,
) -> Result<Option<WorkoutExercise>> {
    let workout_exercise = sqlx::query_as::<_, WorkoutExercise>(
        r#"
        INSERT INTO workout_exercises (workout_id, exercise_id, "order", created_at)
        SELECT
            w.id,
            e.id,
            COALESCE(
                (SELECT MAX(we."order") FROM workout_exercises we WHERE we.workout_id = w.id),
                0
            ) + 1,
            ?
        FROM workouts w, exercises e
        WHERE w.id = ? AND w.user_id = ?
          AND e.id = ? AND (e.user_id IS NULL OR e.user_id = ?)
        RETURNING id, workout_id, exercise_id, "order", created_at
        "#,
    )
    .bind(Utc::now())
    .bind(workout_id)
    .bind(user_id.as_str())
    .bind(exercise_id)
    .bind(user_id.as_str())
    .fetch_optional(db)
    .await?;

    if let Some(we) = &workout_exercise {
        tracing::info!(
            "Exercise {} added to workout {} at position {}",
            exercise_id,
            workout_id,
            we.order
        );
    }

    Ok(workout_exercise)
}

/// Log the next set of an exercise within a workout
///
/// The set takes the next `set_number` for that workout exercise. Returns
/// `None` unless the workout exercise belongs to `workout_id` and that
/// workout belongs to `user_id`.
pub async fn add_set(
    db: &Db,
    user_id: &UserId,
    workout_id: i64,
    workout_exercise_id: i64,
    input: &SetInput,
) -> Result<Option<Set>> {
    let valid = input.validate()?;

    let row = sqlx::query_as::<_, SetRow>(
        r#"
        INSERT INTO sets (workout_exercise_id, set_number, weight, reps, created_at)
        SELECT
            we.id,
            COALESCE(
                (SELECT MAX(s.set_number) FROM sets s WHERE s.workout_exercise_id = we.id),
                0
            ) + 1,
            ?,
            ?,
            ?
        FROM workout_exercises we
        JOIN workouts w ON w.id = we.workout_id
        WHERE we.id = ? AND w.id = ? AND w.user_id = ?
        RETURNING id, workout_exercise_id, set_number, weight, reps, created_at
        "#,
    )
    .bind(valid.weight)
    .bind(valid.reps)
    .bind(Utc::now())
    .bind(workout_exercise_id)
    .bind(workout_id)
    .bind(user_id.as_str())
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let set = Set::try_from(row)?;

    tracing::info!(
        "Set {} logged for workout exercise {}",
        set.set_number,
        workout_exercise_id
    );

    Ok(Some(set))
}
