use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::db::exercises as store;
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExerciseInput, Set, SetInput, WorkoutExercise, WorkoutExerciseInput};
use crate::routes::{parse_id, ValidJson};
use crate::AppState;

/// GET /api/exercises
pub async fn list_exercises(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Exercise>>> {
    Ok(Json(store::list_exercises(&state.db, &user).await?))
}

/// POST /api/exercises `{ "name": string }`
pub async fn create_exercise(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<ExerciseInput>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let exercise = store::create_exercise(&state.db, &user, &payload).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// Append an exercise to a workout
///
/// POST /api/workouts/:workout_id/exercises `{ "exerciseId": number }`
pub async fn add_workout_exercise(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(workout_id): Path<String>,
    ValidJson(payload): ValidJson<WorkoutExerciseInput>,
) -> Result<(StatusCode, Json<WorkoutExercise>)> {
    let workout_id = parse_id(&workout_id).ok_or(AppError::WorkoutNotFound)?;

    store::add_exercise_to_workout(&state.db, &user, workout_id, payload.exercise_id)
        .await?
        .map(|we| (StatusCode::CREATED, Json(we)))
        .ok_or(AppError::NotFound("Workout or exercise"))
}

/// Log the next set of an exercise
///
/// POST /api/workouts/:workout_id/exercises/:workout_exercise_id/sets
/// `{ "weight": number, "reps": number }`
pub async fn add_set(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((workout_id, workout_exercise_id)): Path<(String, String)>,
    ValidJson(payload): ValidJson<SetInput>,
) -> Result<(StatusCode, Json<Set>)> {
    let workout_id = parse_id(&workout_id).ok_or(AppError::WorkoutNotFound)?;
    let workout_exercise_id =
        parse_id(&workout_exercise_id).ok_or(AppError::NotFound("Workout exercise"))?;

    store::add_set(&state.db, &user, workout_id, workout_exercise_id, &payload)
        .await?
        .map(|set| (StatusCode::CREATED, Json(set)))
        .ok_or(AppError::NotFound("Workout exercise"))
}
