use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every failure a handler can produce is one of these variants; handlers
/// and the store never inspect ad hoc error fields to tell conditions
/// apart. `MalformedId` and `NotFound` both render as 404 but stay
/// distinct variants with distinct fixed messages.
#[derive(Debug)]
pub enum AppError {
    /// A required field failed its format check.
    Validation(String),
    /// The store rejected a write (duplicate, constraint violation,
    /// connectivity). Reported like a validation failure, message intact.
    PersistenceWrite(String),
    /// Well-formed identifier with no matching record.
    NotFound,
    /// Identifier not in the store's expected shape.
    MalformedId,
    /// Geocoding responded but without a usable coordinate pair.
    EnrichmentFailure,
    /// Anything else: read failures, transport failures, parse failures.
    Unexpected(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::PersistenceWrite(msg) => write!(f, "{}", msg),
            AppError::NotFound => write!(f, "Contact not found"),
            AppError::MalformedId => write!(f, "Invalid contact ID"),
            AppError::EnrichmentFailure => write!(f, "Failed to retrieve coordinates"),
            AppError::Unexpected(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each variant to its status code and renders the body as
    /// `{"error": <message>}`. Server-side failures are logged here so
    /// handlers don't have to.
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PersistenceWrite(msg) => {
                tracing::warn!("Store rejected write: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Contact not found".to_string()),
            AppError::MalformedId => (StatusCode::NOT_FOUND, "Invalid contact ID".to_string()),
            AppError::EnrichmentFailure => {
                tracing::error!("Geocoding response missing coordinates");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve coordinates".to_string(),
                )
            }
            AppError::Unexpected(msg) => {
                tracing::error!("Unexpected error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    /// Read-path database failures surface with their raw message. The
    /// write path maps its own errors to `PersistenceWrite` explicitly.
    fn from(err: sqlx::Error) -> Self {
        AppError::Unexpected(err.to_string())
    }
}
