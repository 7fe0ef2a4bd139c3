use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sa_core::Error;
use serde_json::json;

/// Maps domain errors onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Validation { field, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.0.to_string(), "field": field, "reason": reason }),
            ),
            Error::Source(message) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": self.0.to_string(), "reason": message }),
            ),
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": other.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
