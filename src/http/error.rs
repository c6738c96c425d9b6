use crate::domain::error::DomainError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use validator::ValidationErrors;

pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const VALIDATION_FAILED: &str = "Request validation failed";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read or deserialized.
    Rejection(JsonRejection),
    /// Body deserialized but broke a field constraint.
    Validation(ValidationErrors),
    /// Store-layer failure on a path that does not handle it.
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Rejection(rejection) => {
                let status = rejection.status();
                (
                    status,
                    ErrorResponse {
                        error: status
                            .canonical_reason()
                            .unwrap_or("BadRequest")
                            .replace(' ', ""),
                        message: rejection.body_text(),
                        details: None,
                    },
                )
            }
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "UnprocessableEntity".to_string(),
                    message: VALIDATION_FAILED.to_string(),
                    details: serde_json::to_value(&errors).ok(),
                },
            ),
            ApiError::Domain(e) => {
                tracing::error!(error = %e, "request failed in store layer");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "InternalServerError".to_string(),
                        message: INTERNAL_ERROR.to_string(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
