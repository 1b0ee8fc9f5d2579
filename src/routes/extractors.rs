//! Custom Axum extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body fields that a decoding error can be pinned to
const BODY_FIELDS: &[&str] = &["name", "date", "weight", "reps", "exerciseId"];

/// JSON body whose decoding failures become field-level validation errors
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_validation(rejection)),
        }
    }
}

fn rejection_to_validation(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    tracing::debug!("Rejected request body: {}", message);

    let field = match rejection {
        JsonRejection::JsonDataError(_) => rejected_field(&message),
        _ => "body",
    };
    AppError::validation(field, message)
}

/// Pick the top-level field out of a decoding message such as
/// `Failed to deserialize ...: date: invalid type: ...`
fn rejected_field(message: &str) -> &'static str {
    message
        .split(": ")
        .nth(1)
        .and_then(|path| path.split('.').next())
        .and_then(|path| BODY_FIELDS.iter().find(|field| **field == path))
        .copied()
        .unwrap_or("body")
}
