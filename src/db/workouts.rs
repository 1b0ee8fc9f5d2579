//! Workout reads and writes
//!
//! Every statement carries the owner's id in its WHERE clause. Ownership is
//! never checked in a separate query before acting, so a caller who guesses
//! another user's workout id gets the same "not found" as for an id that
//! does not exist.

use chrono::Utc;

use crate::date::CanonicalDate;
use crate::db::aggregate::{assemble, AggregateRow};
use crate::db::Db;
use crate::error::Result;
use crate::models::{NameChange, UserId, Workout, WorkoutInput, WorkoutWithExercises};

const WORKOUT_COLUMNS: &str =
    "id, user_id, name, date, started_at, completed_at, created_at, updated_at";

/// Create a workout owned by `user_id`
///
/// Input is validated before anything touches the database.
pub async fn create_workout(db: &Db, user_id: &UserId, input: &WorkoutInput) -> Result<Workout> {
    let valid = input.validate()?;
    let now = Utc::now();

    let sql = format!(
        "INSERT INTO workouts (user_id, name, date, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING {WORKOUT_COLUMNS}"
    );
    let workout = sqlx::query_as::<_, Workout>(&sql)
        .bind(user_id.as_str())
        .bind(valid.name.into_initial())
        .bind(valid.date)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?;

    tracing::info!(
        "Workout {} created for user {} on {}",
        workout.id,
        user_id,
        workout.date
    );

    Ok(workout)
}

/// Fetch one workout, or `None` when it does not exist or is not owned by
/// `user_id`
pub async fn get_workout_by_id(db: &Db, user_id: &UserId, workout_id: i64) -> Result<Option<Workout>> {
    let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ? AND user_id = ?");
    let workout = sqlx::query_as::<_, Workout>(&sql)
        .bind(workout_id)
        .bind(user_id.as_str())
        .fetch_optional(db)
        .await?;

    Ok(workout)
}

/// Update the name and date of a workout owned by `user_id`
///
/// An omitted name leaves the stored one untouched; a blank name clears it.
/// Returns `None` when no row matched id and owner together. Concurrent
/// updates to the same row are last-write-wins.
pub async fn update_workout(
    db: &Db,
    user_id: &UserId,
    workout_id: i64,
    input: &WorkoutInput,
) -> Result<Option<Workout>> {
    let valid = input.validate()?;

    let (replace_name, new_name) = match valid.name {
        NameChange::Keep => (false, None),
        NameChange::Clear => (true, None),
        NameChange::Set(name) => (true, Some(name)),
    };

    let sql = format!(
        "UPDATE workouts \
         SET name = CASE WHEN ? THEN ? ELSE name END, date = ?, updated_at = ? \
         WHERE id = ? AND user_id = ? \
         RETURNING {WORKOUT_COLUMNS}"
    );
    let workout = sqlx::query_as::<_, Workout>(&sql)
        .bind(replace_name)
        .bind(new_name)
        .bind(valid.date)
        .bind(Utc::now())
        .bind(workout_id)
        .bind(user_id.as_str())
        .fetch_optional(db)
        .await?;

    match &workout {
        Some(w) => tracing::info!("Workout {} updated by user {}", w.id, user_id),
        None => tracing::debug!(
            "Update of workout {} by user {} matched no row",
            workout_id,
            user_id
        ),
    }

    Ok(workout)
}

/// All of a user's workouts on `date`, each with its exercises and sets
///
/// Workouts are ordered by id, which is creation order. The rows come from a
/// single statement, so the result reflects one consistent snapshot. No
/// workouts on the date gives an empty list.
pub async fn get_workouts_for_date(
    db: &Db,
    user_id: &UserId,
    date: CanonicalDate,
) -> Result<Vec<WorkoutWithExercises>> {
    let rows = sqlx::query_as::<_, AggregateRow>(
        r#"
        SELECT
            w.id AS workout_id,
            w.name AS workout_name,
            w.date AS workout_date,
            we.id AS workout_exercise_id,
            we."order" AS exercise_order,
            e.name AS exercise_name,
            s.id AS set_id,
            s.set_number AS set_number,
            s.weight AS weight,
            s.reps AS reps
        FROM workouts w
        LEFT JOIN workout_exercises we ON we.workout_id = w.id
        LEFT JOIN exercises e ON e.id = we.exercise_id
        LEFT JOIN sets s ON s.workout_exercise_id = we.id
        WHERE w.user_id = ? AND w.date = ?
        ORDER BY w.id, we."order", we.id, s.set_number, s.id
        "#,
    )
    .bind(user_id.as_str())
    .bind(date)
    .fetch_all(db)
    .await?;

    let workouts = assemble(rows)?;

    tracing::debug!(
        "Loaded {} workouts for user {} on {}",
        workouts.len(),
        user_id,
        date
    );

    Ok(workouts)
}
