use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{auth::AuthError, client::ServiceError, validation};

/// AppError
///
/// Every failure a handler can return. Converted into a JSON body the dashboard
/// shows as a toast; nothing is retried on the server side.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "One or more fields are invalid".to_string(),
            ),
            AppError::Service(err) => service_parts(err),
            AppError::Auth(AuthError::Service(err)) => service_parts(err),
            AppError::Auth(err @ AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
            }
            AppError::Auth(err @ AuthError::AlreadyExists) => {
                (StatusCode::CONFLICT, "conflict", err.to_string())
            }
        }
    }
}

fn service_parts(err: &ServiceError) -> (StatusCode, &'static str, String) {
    match err {
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", err.to_string()),
        ServiceError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        ServiceError::Conflict(_) => (StatusCode::CONFLICT, "conflict", err.to_string()),
        ServiceError::Rejected(_) => (StatusCode::BAD_REQUEST, "rejected", err.to_string()),
        ServiceError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout", err.to_string()),
        ServiceError::Network(_)
        | ServiceError::Status { .. }
        | ServiceError::Decode(_)
        | ServiceError::Request(_) => (StatusCode::BAD_GATEWAY, "bad_gateway", err.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let details = match self {
            AppError::Validation(details) => Some(details),
            _ => None,
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation::describe(&errors))
    }
}
