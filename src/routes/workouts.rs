use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::date::CanonicalDate;
use crate::db::workouts as store;
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutInput, WorkoutWithExercises};
use crate::routes::{parse_id, ValidJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutsForDateResponse {
    /// The date actually shown, after falling back to today
    pub date: CanonicalDate,
    pub previous_date: CanonicalDate,
    pub next_date: CanonicalDate,
    pub workouts: Vec<WorkoutWithExercises>,
}

/// Workouts for one day
///
/// GET /api/workouts?date=YYYY-MM-DD
///
/// A missing or malformed `date` shows today (server local time) instead of
/// failing.
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<DateQuery>,
) -> Result<Json<WorkoutsForDateResponse>> {
    let date = CanonicalDate::parse_or_today(params.date.as_deref(), &Local);
    let workouts = store::get_workouts_for_date(&state.db, &user, date).await?;

    Ok(Json(WorkoutsForDateResponse {
        date,
        previous_date: date.previous_day(),
        next_date: date.next_day(),
        workouts,
    }))
}

/// Create a workout
///
/// POST /api/workouts `{ "name"?: string, "date": "YYYY-MM-DD" }`
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<WorkoutInput>,
) -> Result<(StatusCode, Json<Workout>)> {
    let workout = store::create_workout(&state.db, &user, &payload).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// Fetch one workout for editing
///
/// GET /api/workouts/:workout_id
pub async fn get_workout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(workout_id): Path<String>,
) -> Result<Json<Workout>> {
    let workout_id = parse_id(&workout_id).ok_or(AppError::WorkoutNotFound)?;

    store::get_workout_by_id(&state.db, &user, workout_id)
        .await?
        .map(Json)
        .ok_or(AppError::WorkoutNotFound)
}

/// Rename or re-date a workout
///
/// PUT /api/workouts/:workout_id `{ "name"?: string, "date": "YYYY-MM-DD" }`
///
/// Leaving out `name` keeps the current one. A workout owned by someone else
/// answers 404 exactly like a missing one.
pub async fn update_workout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(workout_id): Path<String>,
    ValidJson(payload): ValidJson<WorkoutInput>,
) -> Result<Json<Workout>> {
    let workout_id = parse_id(&workout_id).ok_or(AppError::WorkoutNotFound)?;

    store::update_workout(&state.db, &user, workout_id, &payload)
        .await?
        .map(Json)
        .ok_or(AppError::WorkoutNotFound)
}
