pub mod exercise;
pub mod set;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, ExerciseInput, WorkoutExercise, WorkoutExerciseInput};
pub use set::{Set, SetInput, SetRow, SetSummary, ValidSet};
pub use user::UserId;
pub use workout::{
    ExerciseWithSets, NameChange, ValidWorkout, Workout, WorkoutInput, WorkoutWithExercises,
};
