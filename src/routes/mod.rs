pub mod exercises;
pub mod extractors;
pub mod health;
pub mod workouts;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use exercises::{add_set, add_workout_exercise, create_exercise, list_exercises};
pub use extractors::ValidJson;
pub use health::health_check;
pub use workouts::{create_workout, get_workout, list_workouts, update_workout};

/// All routes, without middleware layers or state
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/:workout_id", get(get_workout).put(update_workout))
        .route(
            "/api/workouts/:workout_id/exercises",
            post(add_workout_exercise),
        )
        .route(
            "/api/workouts/:workout_id/exercises/:workout_exercise_id/sets",
            post(add_set),
        )
        .route("/api/exercises", get(list_exercises).post(create_exercise))
}

/// Parse an id taken from the URL
///
/// Anything that is not a positive integer cannot name a row, so it is
/// reported as not found rather than as a bad request.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id(""), None);
    }
}
