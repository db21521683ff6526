use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Submitted data rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{field} must be a whole number")]
    Rating { field: &'static str },

    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please enter a valid age between 5 and 120.")]
    AgeOutOfRange,

    #[error("Please select a rating for all questions.")]
    UnsetRating,
}

/// The storage engine rejected or could not complete a read or write.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StorageError(#[from] pub sqlx::Error);

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to save survey. {0}")]
    Save(#[from] SubmitError),

    #[error("Failed to retrieve survey results. {0}")]
    Results(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Save(SubmitError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Save(SubmitError::Storage(_)) | ApiError::Results(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    /// True when the client sent something we refuse to store.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Save(SubmitError::Validation(_)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if self.is_rejection() {
            tracing::warn!(%status, "{message}");
        } else {
            tracing::error!(%status, "{message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
