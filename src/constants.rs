/// Maximum workout name length, in characters
pub const MAX_WORKOUT_NAME_CHARS: usize = 100;

/// Maximum exercise name length, in characters
pub const MAX_EXERCISE_NAME_CHARS: usize = 100;

/// Header carrying the user id resolved by the identity proxy
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the hex HMAC-SHA256 of the user id
pub const USER_SIGNATURE_HEADER: &str = "x-user-signature";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a workout name over the length limit
pub const ERR_WORKOUT_NAME_TOO_LONG: &str = "Name must be at most 100 characters";

/// Error message for an exercise name that is empty or too long
pub const ERR_EXERCISE_NAME_LENGTH: &str = "Name must be between 1 and 100 characters";

/// Error message for a weight that is negative or not a number
pub const ERR_INVALID_WEIGHT: &str = "Weight must be a non-negative number";

/// Error message for a rep count below one
pub const ERR_INVALID_REPS: &str = "Reps must be at least 1";
